use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use url::Url;

pub const SANDBOX_BASE_URL: &str = "https://atfawry.fawrystaging.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "ENGLISH",
            Language::Arabic => "ARABIC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else {
            Platform::Android
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MerchantInfo {
    pub merchant_code: String,
    pub merchant_secret_code: String,
    /// Replaced with a fresh value for every checkout.
    #[serde(default)]
    pub merchant_ref_num: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub customer_name: String,
    pub customer_mobile: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_profile_id: Option<String>,
}

/// Quantity and price stay strings because that is what the SDK accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub item_id: String,
    pub description: String,
    pub quantity: String,
    pub price: String,
}

impl BillItem {
    pub fn new(item_id: &str, description: &str, quantity: u32, price: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            description: description.to_string(),
            quantity: quantity.to_string(),
            price: price.to_string(),
        }
    }

    pub fn line_total(&self) -> CoreResult<Decimal> {
        let quantity: u32 = self.quantity.trim().parse().map_err(|_| {
            self.invalid(format!("quantity {:?} is not a whole number", self.quantity))
        })?;
        let price = Decimal::from_str(self.price.trim())
            .map_err(|_| self.invalid(format!("price {:?} is not a number", self.price)))?;
        if price.is_sign_negative() {
            return Err(self.invalid(format!("price {:?} is negative", self.price)));
        }
        price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| self.invalid("line total overflows".to_string()))
    }

    fn invalid(&self, reason: String) -> CoreError {
        CoreError::BillItem {
            item_id: self.item_id.clone(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutFlags {
    #[serde(rename = "allow3DPayment")]
    pub allow_3d_payment: bool,
    pub skip_receipt: bool,
    pub skip_login: bool,
    pub pay_with_card_token: bool,
    pub auth_capture_mode: bool,
    pub allow_voucher: bool,
}

impl Default for CheckoutFlags {
    fn default() -> Self {
        Self {
            allow_3d_payment: true,
            skip_receipt: false,
            skip_login: true,
            pay_with_card_token: true,
            auth_capture_mode: false,
            allow_voucher: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfig {
    pub base_url: String,
    #[serde(rename = "lang", alias = "language", default)]
    pub language: Language,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(flatten)]
    pub flags: CheckoutFlags,
    pub items: Vec<BillItem>,
    pub merchant_info: MerchantInfo,
    pub customer_info: CustomerInfo,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub platform_merchants: BTreeMap<Platform, MerchantInfo>,
}

/// One checkout invocation as handed to the SDK.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub base_url: String,
    #[serde(rename = "lang")]
    pub language: Language,
    pub signature: Option<String>,
    #[serde(flatten)]
    pub flags: CheckoutFlags,
    pub items: Vec<BillItem>,
    pub merchant_info: MerchantInfo,
    pub customer_info: CustomerInfo,
}

impl CheckoutRequest {
    pub fn total_amount(&self) -> CoreResult<Decimal> {
        sum_items(&self.items)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self::sandbox()
    }
}

impl CheckoutConfig {
    /// Staging configuration with placeholder credentials.
    pub fn sandbox() -> Self {
        Self {
            base_url: SANDBOX_BASE_URL.to_string(),
            language: Language::English,
            signature: None,
            flags: CheckoutFlags::default(),
            items: vec![
                BillItem::new("item1", "Item 1 Description", 1, "300"),
                BillItem::new("item2", "Item 2 Description", 1, "200"),
                BillItem::new("item3", "Item 3 Description", 1, "500"),
            ],
            merchant_info: MerchantInfo {
                merchant_code: "SANDBOX-MERCHANT-CODE".to_string(),
                merchant_secret_code: "SANDBOX-MERCHANT-SECRET".to_string(),
                merchant_ref_num: String::new(),
            },
            customer_info: CustomerInfo {
                customer_name: "Sandbox Customer".to_string(),
                customer_mobile: "+1234567890".to_string(),
                customer_email: "customer@example.com".to_string(),
                customer_profile_id: Some("12345".to_string()),
            },
            platform_merchants: BTreeMap::new(),
        }
    }

    pub fn load(path: &Path) -> CoreResult<Self> {
        let data = fs::read_to_string(path)?;
        let cfg: CheckoutConfig = serde_json::from_str(&data)?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), items = cfg.items.len(), "checkout config loaded");
        Ok(cfg)
    }

    pub fn validate(&self) -> CoreResult<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "base_url must be http(s), got {}",
                url.scheme()
            )));
        }
        if self.items.is_empty() {
            return Err(CoreError::Config("at least one bill item is required".to_string()));
        }
        for merchant in std::iter::once(&self.merchant_info).chain(self.platform_merchants.values()) {
            if merchant.merchant_code.trim().is_empty() {
                return Err(CoreError::Config("merchant_code is required".to_string()));
            }
        }
        sum_items(&self.items).map(|_| ())
    }

    pub fn total_amount(&self) -> CoreResult<Decimal> {
        sum_items(&self.items)
    }

    pub fn merchant_for(&self, platform: Platform) -> &MerchantInfo {
        self.platform_merchants.get(&platform).unwrap_or(&self.merchant_info)
    }

    pub fn launch_request(&self, platform: Platform, merchant_ref_num: String) -> CheckoutRequest {
        let mut merchant_info = self.merchant_for(platform).clone();
        merchant_info.merchant_ref_num = merchant_ref_num;
        CheckoutRequest {
            base_url: self.base_url.clone(),
            language: self.language,
            signature: self.signature.clone(),
            flags: self.flags,
            items: self.items.clone(),
            merchant_info,
            customer_info: self.customer_info.clone(),
        }
    }
}

fn sum_items(items: &[BillItem]) -> CoreResult<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        total
            .checked_add(item.line_total()?)
            .ok_or_else(|| CoreError::Config("bill total overflows".to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sandbox_config_is_valid() {
        let cfg = CheckoutConfig::sandbox();
        cfg.validate().unwrap();
        assert_eq!(cfg.total_amount().unwrap(), Decimal::from(1000));
    }

    #[test]
    fn line_total_multiplies_quantity() {
        let item = BillItem::new("item2", "Item 2", 2, "25");
        assert_eq!(item.line_total().unwrap(), Decimal::from(50));
    }

    #[test]
    fn fractional_prices_sum_exactly() {
        let mut cfg = CheckoutConfig::sandbox();
        cfg.items = (1..=3)
            .map(|n| BillItem::new(&format!("item{n}"), "Dime", 1, "0.1"))
            .collect();
        assert_eq!(cfg.total_amount().unwrap(), Decimal::new(3, 1));
        assert_eq!(cfg.total_amount().unwrap().to_string(), "0.3");
    }

    #[test]
    fn line_total_rejects_negative_price() {
        let item = BillItem::new("refund", "Refund", 1, "-5");
        assert!(matches!(item.line_total(), Err(CoreError::BillItem { .. })));
    }

    #[test]
    fn line_total_rejects_bad_price() {
        let item = BillItem::new("item1", "Item 1", 1, "fifty");
        match item.line_total() {
            Err(CoreError::BillItem { item_id, .. }) => assert_eq!(item_id, "item1"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_empty_items() {
        let mut cfg = CheckoutConfig::sandbox();
        cfg.items.clear();
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut cfg = CheckoutConfig::sandbox();
        cfg.base_url = "not a url".to_string();
        assert!(matches!(cfg.validate(), Err(CoreError::BaseUrl(_))));

        cfg.base_url = "ftp://example.com/".to_string();
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn platform_override_wins() {
        let mut cfg = CheckoutConfig::sandbox();
        let ios = MerchantInfo {
            merchant_code: "IOS-CODE".to_string(),
            merchant_secret_code: "IOS-SECRET".to_string(),
            merchant_ref_num: String::new(),
        };
        cfg.platform_merchants.insert(Platform::Ios, ios);

        assert_eq!(cfg.merchant_for(Platform::Ios).merchant_code, "IOS-CODE");
        assert_eq!(cfg.merchant_for(Platform::Android).merchant_code, "SANDBOX-MERCHANT-CODE");
    }

    #[test]
    fn launch_request_carries_ref_num_signature_and_voucher() {
        let mut cfg = CheckoutConfig::sandbox();
        cfg.signature = Some("sig".to_string());
        let req = cfg.launch_request(Platform::Android, "ref-1".to_string());

        assert_eq!(req.merchant_info.merchant_ref_num, "ref-1");
        assert_eq!(req.signature.as_deref(), Some("sig"));
        assert!(req.flags.allow_voucher);
        // the stored config keeps its own ref num untouched
        assert!(cfg.merchant_info.merchant_ref_num.is_empty());
    }

    #[test]
    fn request_serializes_with_sdk_field_names() {
        let req = CheckoutConfig::sandbox().launch_request(Platform::Android, "ref".to_string());
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["lang"], "ENGLISH");
        assert_eq!(value["allow3DPayment"], true);
        assert_eq!(value["merchantInfo"]["merchantRefNum"], "ref");
        assert_eq!(value["items"][0]["itemId"], "item1");
    }

    #[test]
    fn load_reads_json_file() {
        let json = serde_json::json!({
            "baseUrl": "https://atfawry.fawrystaging.com/",
            "language": "ARABIC",
            "allow3DPayment": true,
            "skipReceipt": false,
            "skipLogin": true,
            "payWithCardToken": true,
            "authCaptureMode": false,
            "allowVoucher": false,
            "items": [
                { "itemId": "item1", "description": "Item 1", "quantity": "3", "price": "20" }
            ],
            "merchantInfo": { "merchantCode": "CODE", "merchantSecretCode": "SECRET" },
            "customerInfo": {
                "customerName": "A",
                "customerMobile": "+1",
                "customerEmail": "a@example.com"
            },
            "platformMerchants": {
                "ios": { "merchantCode": "IOS", "merchantSecretCode": "IOS-SECRET" }
            }
        });
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();

        let cfg = CheckoutConfig::load(file.path()).unwrap();
        assert_eq!(cfg.language, Language::Arabic);
        assert!(!cfg.flags.allow_voucher);
        assert_eq!(cfg.total_amount().unwrap(), Decimal::from(60));
        assert_eq!(cfg.merchant_for(Platform::Ios).merchant_code, "IOS");
        assert_eq!(cfg.customer_info.customer_profile_id, None);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CheckoutConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
