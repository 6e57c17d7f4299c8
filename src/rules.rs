use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratingRule
{
    /// \brief Chebyshev-Lobatto extrema on [-1, 1], reordered into a Leja sequence so that every prefix is well conditioned.
    #[default]
    ChebyshevLeja,
    /// \brief Chebyshev-Lobatto extrema on [-1, 1] in descending order.
    ChebyshevLobatto,
    /// \brief Equally spaced points on [-1, 1]. Poorly conditioned for large sizes.
    Equidistant,
}
