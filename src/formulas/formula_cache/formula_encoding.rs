use crate::formulas::{FormulaType, LitType};

const INDEX_ENCODING_SHIFT: u8 = 4;
const TYPE_ENCODE_MASK: u64 = 0b0000_1111;

const ENCODING_TRUE: u64 = 0x01;
const ENCODING_FALSE: u64 = 0x02;
const ENCODING_POS_LIT: u64 = 0x03;
const ENCODING_NEG_LIT: u64 = 0x04;
const ENCODING_AND: u64 = 0x05;
const ENCODING_OR: u64 = 0x06;
const ENCODING_NOT: u64 = 0x07;
const ENCODING_IMPL: u64 = 0x08;
const ENCODING_EQUIV: u64 = 0x09;
const ENCODING_PBC: u64 = 0x0A;

/// Packs the type of a formula node and its index in the node table of the
/// owning factory into one `u64`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct FormulaEncoding {
    pub(crate) encoding: u64,
}

impl FormulaEncoding {
    pub(crate) const fn encode(index: u64, ty: FormulaType) -> Self {
        let header = match ty {
            FormulaType::True => ENCODING_TRUE,
            FormulaType::False => ENCODING_FALSE,
            FormulaType::Lit(LitType::Pos) => ENCODING_POS_LIT,
            FormulaType::Lit(LitType::Neg) => ENCODING_NEG_LIT,
            FormulaType::And => ENCODING_AND,
            FormulaType::Or => ENCODING_OR,
            FormulaType::Not => ENCODING_NOT,
            FormulaType::Impl => ENCODING_IMPL,
            FormulaType::Equiv => ENCODING_EQUIV,
            FormulaType::Pbc => ENCODING_PBC,
        };
        Self { encoding: header | (index << INDEX_ENCODING_SHIFT) }
    }

    pub(crate) const fn index(self) -> u64 {
        self.encoding >> INDEX_ENCODING_SHIFT
    }

    pub(crate) fn formula_type(self) -> FormulaType {
        match self.encoding & TYPE_ENCODE_MASK {
            ENCODING_TRUE => FormulaType::True,
            ENCODING_FALSE => FormulaType::False,
            ENCODING_POS_LIT => FormulaType::Lit(LitType::Pos),
            ENCODING_NEG_LIT => FormulaType::Lit(LitType::Neg),
            ENCODING_AND => FormulaType::And,
            ENCODING_OR => FormulaType::Or,
            ENCODING_NOT => FormulaType::Not,
            ENCODING_IMPL => FormulaType::Impl,
            ENCODING_EQUIV => FormulaType::Equiv,
            ENCODING_PBC => FormulaType::Pbc,
            _ => panic!("Unexpected formula encoding"),
        }
    }
}
