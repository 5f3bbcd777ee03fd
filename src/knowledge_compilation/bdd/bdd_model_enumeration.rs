use crate::datastructures::Model;
use crate::formulas::Variable;

use super::bdd_kernel::{BddKernel, BDD_TRUE};
use super::bdd_operations::BddPath;

/// Enumerates all models of the BDD. Without explicit `variables`, the models
/// range over all variables of the kernel. Variables which are not tested on
/// a path are expanded to both values.
pub fn enumerate_all_models(index: usize, variables: Option<&[Variable]>, kernel: &BddKernel) -> Vec<Model> {
    let mut relevant_indices: Vec<usize> = match variables {
        Some(vars) => vars.iter().filter_map(|v| kernel.var2idx.get(v).copied()).collect(),
        None => kernel.var2idx.values().copied().collect(),
    };
    relevant_indices.sort_unstable();
    relevant_indices.dedup();
    let mut res = Vec::new();
    for mut path in kernel.all_paths(index, BDD_TRUE) {
        generate_all_models(&mut res, &mut path, &relevant_indices, 0, kernel);
    }
    res
}

fn generate_all_models(models: &mut Vec<Model>, path: &mut BddPath, relevant_indices: &[usize], position: usize, kernel: &BddKernel) {
    if position == relevant_indices.len() {
        let mut pos = Vec::new();
        let mut neg = Vec::new();
        for &i in relevant_indices {
            if let Some(var) = kernel.get_variable_for_index(i) {
                if path[i] == Some(true) {
                    pos.push(var);
                } else {
                    neg.push(var);
                }
            }
        }
        models.push(Model::new(pos, neg));
    } else if path[relevant_indices[position]].is_some() {
        generate_all_models(models, path, relevant_indices, position + 1, kernel);
    } else {
        let index = relevant_indices[position];
        path[index] = Some(false);
        generate_all_models(models, path, relevant_indices, position + 1, kernel);
        path[index] = Some(true);
        generate_all_models(models, path, relevant_indices, position + 1, kernel);
        path[index] = None;
    }
}
