use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::errors::AppError;
use crate::models::StockIntelligence;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/stock/:symbol/intelligence", get(stock_intelligence))
}

/// GET /stock/{symbol}/intelligence
///
/// AI score, bias and component breakdown for a specific stock
async fn stock_intelligence(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<StockIntelligence>, AppError> {
    validate_symbol(&symbol)?;
    Ok(Json(state.intelligence.intelligence(&symbol).await))
}

fn validate_symbol(symbol: &str) -> Result<(), AppError> {
    let valid = !symbol.is_empty()
        && symbol.len() <= 24
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '&' | '^' | '='));
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!("Invalid symbol: {symbol}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_validation() {
        assert!(validate_symbol("RELIANCE").is_ok());
        assert!(validate_symbol("M&M").is_ok());
        assert!(validate_symbol("TCS-EQ").is_ok());
        assert!(validate_symbol("^NSEI").is_ok());
        assert!(validate_symbol("").is_err());
        assert!(validate_symbol("has space").is_err());
        assert!(validate_symbol(&"X".repeat(25)).is_err());
    }
}
