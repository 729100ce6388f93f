use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub duration_minutes: u32,
    #[serde(default)]
    pub image_url: String,
}

impl Service {
    pub fn price_label(&self) -> String {
        format!("R$ {:.2}", self.price.round_dp(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_float_price() {
        let json = r#"{"id":"lavagem-simples","name":"Lavagem Simples","description":"Externa","price":50.0,"duration_minutes":30,"image_url":"x.jpg"}"#;
        let service: Service = serde_json::from_str(json).unwrap();
        assert_eq!(service.price, Decimal::new(50, 0));
        assert_eq!(service.price_label(), "R$ 50.00");
    }

    #[test]
    fn test_price_label_rounds_to_cents() {
        let service = Service {
            id: "s".to_string(),
            name: "S".to_string(),
            description: String::new(),
            price: Decimal::new(12_345, 3),
            duration_minutes: 60,
            image_url: String::new(),
        };
        assert_eq!(service.price_label(), "R$ 12.35");
    }
}
