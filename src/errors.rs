use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrafoError
{
    DimensionMismatch,
    InsufficientGeneratingPoints,
    DegenerateGeneratingPoints,
    InvalidTreeStructure,
    InvalidExponents,
    CoefficientLengthMismatch,
    LZ4DecompressionFailed,
    SerializationFailed,
    DeserializationFailed,
}
impl std::error::Error for TrafoError {}

impl Display for TrafoError
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", *self)
    }
}
