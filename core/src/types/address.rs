use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressParams {
    pub receiver: String,
    pub contact: String,
    pub province_code: String,
    pub city_code: String,
    pub county_code: String,
    pub address: String,
    /// 1 marks the default address.
    pub is_default: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressItem {
    pub id: String,
    pub receiver: String,
    pub contact: String,
    pub province_code: String,
    pub city_code: String,
    pub county_code: String,
    pub address: String,
    pub is_default: u8,
    pub full_location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressId {
    pub id: String,
}
