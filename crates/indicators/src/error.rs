use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Calculation error: Division by zero encountered in indicator '{0}'")]
    DivisionByZero(String),

    #[error("Indicator '{indicator}' cannot take the logarithm or ratio of non-positive price {price}")]
    NonPositivePrice { indicator: String, price: f64 },
}
