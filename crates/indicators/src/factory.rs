use crate::annualized_return::AnnualizedReturn;
use crate::max_drawdown::MaxDrawdown;
use crate::performance::Performance;
use crate::volatility::Volatility;
use crate::Indicator;
use core_types::IndicatorId;

/// Creates the indicator identified by `id`.
pub fn create_indicator(id: IndicatorId) -> Box<dyn Indicator> {
    // The compiler will error here if a new IndicatorId is added but not handled.
    match id {
        IndicatorId::Performance => Box::new(Performance),
        IndicatorId::Volatility => Box::new(Volatility),
        IndicatorId::AnnualizedReturn => Box::new(AnnualizedReturn),
        IndicatorId::MaxDrawdown => Box::new(MaxDrawdown),
    }
}

/// Creates one indicator per id, preserving order.
pub fn create_indicators(ids: &[IndicatorId]) -> Vec<Box<dyn Indicator>> {
    ids.iter().copied().map(create_indicator).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_indicators_carry_their_id_as_name() {
        let indicators = create_indicators(&IndicatorId::ALL);
        let names: Vec<&str> = indicators.iter().map(|i| i.name()).collect();
        assert_eq!(
            names,
            vec!["performance", "volatility", "annualized_return", "max_drawdown"]
        );
    }
}
