use log::info;

use crate::{
    curve::Curve,
    error::Result,
    extrapolate::{extrapolate, DerivedPair},
    point::AnnotatedPoint,
    request::SupplyInput,
};

/// A validated input together with its derived reference points.
///
/// `primary` already ends with the derived `[Q20, Q0]` points, which is the
/// order the chart draws and the results table lists them in.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyAnalysis {
    pub primary: Curve,
    pub secondary: Curve,
    pub annotations: Vec<AnnotatedPoint>,
    pub derived: DerivedPair,
}

impl SupplyAnalysis {
    pub fn run(input: SupplyInput) -> Result<Self> {
        let derived = extrapolate(&input.primary)?;
        info!(
            "Derived Q20 = {} gpm, Q0 = {} gpm from {} readings",
            derived.q20.flow,
            derived.q0.flow,
            input.primary.len()
        );
        Ok(SupplyAnalysis {
            primary: input.primary.extended(derived.points()),
            secondary: input.secondary,
            annotations: input.annotations,
            derived,
        })
    }
}
