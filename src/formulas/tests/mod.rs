mod and;
mod implication;
mod restriction;
