//! Write operation discriminator
//!
//! Taken from the `method` query parameter and matched
//! case-insensitively after trimming.

use std::fmt;

/// Every write the endpoint supports, plus the catch-all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOperation {
    UpdateMarketPrices,
    CreateBaseProduct,
    DeleteProduct,
    /// Carries the value as received
    Unknown(String),
}

impl WriteOperation {
    pub const SUPPORTED: [&'static str; 3] = [
        "actualizar_precios_mercado",
        "crear_producto_base",
        "eliminar_producto",
    ];

    pub fn parse(raw: &str) -> Self {
        let name = raw.trim();
        if name.eq_ignore_ascii_case("actualizar_precios_mercado") {
            Self::UpdateMarketPrices
        } else if name.eq_ignore_ascii_case("crear_producto_base") {
            Self::CreateBaseProduct
        } else if name.eq_ignore_ascii_case("eliminar_producto") {
            Self::DeleteProduct
        } else {
            Self::Unknown(raw.to_string())
        }
    }

    /// Canonical wire name
    pub fn name(&self) -> &str {
        match self {
            Self::UpdateMarketPrices => "actualizar_precios_mercado",
            Self::CreateBaseProduct => "crear_producto_base",
            Self::DeleteProduct => "eliminar_producto",
            Self::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for WriteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
