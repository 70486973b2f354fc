//! Scan lookup. Real QR decoding is not done: a code is typed or a scan is
//! simulated, and both go through the same catalog lookup.

use std::time::Duration;

use crate::catalog::Catalog;
use crate::delay;
use crate::models::RentalItem;

pub use crate::seed::DEMO_SCAN_CODE;

/// What the user did on the scan page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanRequest {
    /// "Søk" with the typed code.
    Manual(String),
    /// "Simuler Skanning"; uses the typed code when there is one.
    Simulated { typed: String },
}

impl ScanRequest {
    /// The code to look up, exactly as typed. `None` for a blank manual
    /// search.
    pub fn code(&self) -> Option<String> {
        match self {
            Self::Manual(typed) if typed.trim().is_empty() => None,
            Self::Manual(typed) => Some(typed.clone()),
            Self::Simulated { typed } if typed.is_empty() => Some(DEMO_SCAN_CODE.to_string()),
            Self::Simulated { typed } => Some(typed.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Ingen QR-kode")]
    NoCode,
    #[error("Gjenstand Ikke Funnet")]
    NotFound(String),
}

impl LookupError {
    /// Toast description under the title.
    pub fn detail(&self) -> &'static str {
        match self {
            Self::NoCode => "Vennligst skriv inn en QR-kode verdi.",
            Self::NotFound(_) => "QR-koden matcher ingen gjenstander.",
        }
    }
}

/// Resolves scan requests against a catalog after the configured latency.
#[derive(Clone, Debug)]
pub struct Scanner<C> {
    catalog: C,
    delay: Duration,
}

impl<C: Catalog> Scanner<C> {
    pub fn new(catalog: C, delay: Duration) -> Self {
        Self { catalog, delay }
    }

    pub async fn resolve(&self, request: &ScanRequest) -> Result<RentalItem, LookupError> {
        let code = request.code().ok_or(LookupError::NoCode)?;
        tracing::debug!(%code, "looking up scan code");
        delay::sleep(self.delay).await;
        self.catalog
            .find_by_code(&code)
            .await
            .ok_or(LookupError::NotFound(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;

    fn scanner() -> Scanner<MemoryCatalog> {
        Scanner::new(MemoryCatalog::new(), Duration::ZERO)
    }

    #[tokio::test]
    async fn test_demo_code_always_resolves_to_drone() {
        let scanner = scanner();
        let first = scanner
            .resolve(&ScanRequest::Manual("RELIVERY-123".into()))
            .await
            .unwrap();
        let second = scanner
            .resolve(&ScanRequest::Simulated { typed: "RELIVERY-123".into() })
            .await
            .unwrap();
        assert_eq!(first.name, "Profesjonell Drone");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_padded_code_is_not_the_demo_code() {
        let scanner = scanner();
        let padded = scanner
            .resolve(&ScanRequest::Manual(" RELIVERY-123 ".into()))
            .await;
        assert_eq!(padded, Err(LookupError::NotFound(" RELIVERY-123 ".to_string())));

        let blank_typed = scanner
            .resolve(&ScanRequest::Simulated { typed: "   ".into() })
            .await;
        assert_eq!(blank_typed, Err(LookupError::NotFound("   ".to_string())));
    }

    #[tokio::test]
    async fn test_other_codes_are_not_found() {
        let scanner = scanner();
        for code in ["RELIVERY-124", "relivery-123", "item1"] {
            let result = scanner.resolve(&ScanRequest::Manual(code.into())).await;
            assert_eq!(result, Err(LookupError::NotFound(code.to_string())));
        }
    }

    #[tokio::test]
    async fn test_empty_manual_search_is_rejected() {
        let result = scanner().resolve(&ScanRequest::Manual("   ".into())).await;
        assert_eq!(result, Err(LookupError::NoCode));
        assert_eq!(LookupError::NoCode.to_string(), "Ingen QR-kode");
    }

    #[tokio::test]
    async fn test_simulated_scan_prefers_typed_code() {
        let scanner = scanner();
        let demo = scanner
            .resolve(&ScanRequest::Simulated { typed: String::new() })
            .await
            .unwrap();
        assert_eq!(demo.id, "item-qr-123");

        let typed = scanner
            .resolve(&ScanRequest::Simulated { typed: "XYZ".into() })
            .await;
        assert!(matches!(typed, Err(LookupError::NotFound(_))));
    }
}
