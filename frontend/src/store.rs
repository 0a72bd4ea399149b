//! Storefront helpers.

use desync_shared::{PaymentMethod, Purchase, PurchaseStatus, Software, SoftwareKind};

/// A product counts as owned once a completed purchase exists for it.
pub fn is_owned(software_id: u64, purchases: &[Purchase]) -> bool {
    purchases
        .iter()
        .any(|p| p.software_id == software_id && p.status == PurchaseStatus::Completed)
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub fn kind_label(kind: SoftwareKind) -> &'static str {
    match kind {
        SoftwareKind::Movement => "Movement",
        SoftwareKind::HvH => "HvH",
    }
}

pub fn payment_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Crypto => "Cryptocurrency",
        PaymentMethod::Card => "Credit / Debit Card",
    }
}

pub fn parse_payment_method(value: &str) -> Option<PaymentMethod> {
    match value {
        "Crypto" => Some(PaymentMethod::Crypto),
        "Card" => Some(PaymentMethod::Card),
        _ => None,
    }
}

pub fn status_label(status: PurchaseStatus) -> &'static str {
    match status {
        PurchaseStatus::Completed => "Completed",
        PurchaseStatus::Pending => "Pending",
        PurchaseStatus::Failed => "Failed",
    }
}

/// Name of the product a purchase refers to.
pub fn product_name(software_id: u64, catalogue: &[Software]) -> String {
    catalogue
        .iter()
        .find(|s| s.id == software_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| format!("Software #{software_id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn purchase(software_id: u64, status: &str) -> Purchase {
        serde_json::from_value(json!({
            "id": 1, "userId": 1, "softwareId": software_id,
            "paymentMethod": "Card", "status": status
        }))
        .unwrap()
    }

    #[test]
    fn test_only_completed_purchases_count_as_owned() {
        let purchases = [purchase(1, "Pending"), purchase(2, "Completed"), purchase(3, "Failed")];
        assert!(!is_owned(1, &purchases));
        assert!(is_owned(2, &purchases));
        assert!(!is_owned(3, &purchases));
        assert!(!is_owned(4, &purchases));
    }

    #[test]
    fn test_price_and_payment_parsing() {
        assert_eq!(format_price(19.9), "$19.90");
        assert_eq!(parse_payment_method("Crypto"), Some(PaymentMethod::Crypto));
        assert_eq!(parse_payment_method(""), None);
    }
}
