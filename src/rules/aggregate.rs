use crate::models::RiskLevel;

/// Highest risk among `risks`; `Safe` when there are none.
pub fn aggregate<I>(risks: I) -> RiskLevel
where
    I: IntoIterator<Item = RiskLevel>,
{
    risks.into_iter().max().unwrap_or(RiskLevel::Safe)
}
