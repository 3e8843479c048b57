use serde::{Deserialize, Serialize};

/// One apartment row from the listings dataset.
///
/// Column names mirror the upstream CSV export; blank text fields arrive as
/// empty strings and a blank or unparseable price as `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(rename = "formattedAddress")]
    pub formatted_address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "zipCode")]
    pub zip_code: String,
    #[serde(rename = "propertyType")]
    pub property_type: String,
    pub bedrooms: String,
    pub bathrooms: String,
    #[serde(rename = "squareFootage")]
    pub square_footage: String,
    #[serde(rename = "yearBuilt")]
    pub year_built: String,
    pub status: String,
    pub price: Option<f64>,
    #[serde(rename = "listingWebsite")]
    pub listing_website: String,
}

impl Listing {
    /// A valid positive monthly price, if the row has one.
    pub fn valid_price(&self) -> Option<f64> {
        self.price.filter(|p| *p > 0.0)
    }

    /// Response shape with blank fields surfaced as "NA".
    pub fn to_output(&self) -> ListingOutput {
        ListingOutput {
            id: na_if_blank(&self.id),
            formatted_address: na_if_blank(&self.formatted_address),
            city: na_if_blank(&self.city),
            state: na_if_blank(&self.state),
            zip_code: na_if_blank(&self.zip_code),
            property_type: na_if_blank(&self.property_type),
            bedrooms: na_if_blank(&self.bedrooms),
            bathrooms: na_if_blank(&self.bathrooms),
            square_footage: na_if_blank(&self.square_footage),
            year_built: na_if_blank(&self.year_built),
            status: na_if_blank(&self.status),
            price: self.price,
            listing_website: na_if_blank(&self.listing_website),
        }
    }
}

fn na_if_blank(value: &str) -> String {
    if value.trim().is_empty() {
        "NA".to_string()
    } else {
        value.to_string()
    }
}

/// Listing as rendered in the move-plan response.
#[derive(Debug, Clone, Serialize)]
pub struct ListingOutput {
    pub id: String,
    #[serde(rename = "formattedAddress")]
    pub formatted_address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "zipCode")]
    pub zip_code: String,
    #[serde(rename = "propertyType")]
    pub property_type: String,
    pub bedrooms: String,
    pub bathrooms: String,
    #[serde(rename = "squareFootage")]
    pub square_footage: String,
    #[serde(rename = "yearBuilt")]
    pub year_built: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "listingWebsite")]
    pub listing_website: String,
}
