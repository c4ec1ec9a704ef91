use actix_multipart::{Field, Multipart};
use futures::StreamExt;
use utoipa::ToSchema;

use crate::listing::application::ports::incoming::use_cases::{
    EditListingCommand, PublishListingCommand,
};
use crate::multimedia::application::domain::entities::MediaPayload;

/// Upper bound for a single text field.
pub const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingFormError {
    #[error("Malformed multipart body: {0}")]
    Malformed(String),

    #[error("Field '{0}' is too long")]
    FieldTooLong(String),

    #[error("File exceeds the maximum size of {max_bytes} bytes")]
    FileTooLarge { max_bytes: usize },

    #[error("Price must be a whole number")]
    InvalidPrice,
}

/// OpenAPI shape of the listing form.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ListingFormSchema {
    #[schema(example = "Appartement 3 pièces")]
    title: String,
    #[schema(example = "Appartement lumineux avec balcon, proche des commerces")]
    description: String,
    #[schema(example = 500000)]
    price: i64,
    /// `sale`, `rental`, `purchase` (or `vente`, `location`, `achat`)
    #[schema(example = "location")]
    property_type: String,
    /// Required when publishing
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    video: Option<Vec<u8>>,
}

/// Raw values of the listing form. Text fields a client did not send are empty.
#[derive(Debug, Default)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub property_type: String,
    pub image: Option<MediaPayload>,
    pub video: Option<MediaPayload>,
}

enum FieldReadError {
    TooLarge,
    Stream(String),
}

impl ListingForm {
    /// Drains the multipart stream. Unknown fields are skipped; a file part with
    /// neither name nor content counts as absent.
    pub async fn read(mut payload: Multipart, max_file_bytes: usize) -> Result<Self, ListingFormError> {
        let mut form = ListingForm::default();

        while let Some(item) = payload.next().await {
            let mut field = item.map_err(|e| ListingFormError::Malformed(e.to_string()))?;
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                "image" | "video" => {
                    let file_name = field
                        .content_disposition()
                        .and_then(|cd| cd.get_filename())
                        .unwrap_or_default()
                        .to_string();
                    let content_type = field.content_type().map(|m| m.to_string());

                    let bytes = read_field(&mut field, max_file_bytes)
                        .await
                        .map_err(|e| match e {
                            FieldReadError::TooLarge => ListingFormError::FileTooLarge {
                                max_bytes: max_file_bytes,
                            },
                            FieldReadError::Stream(msg) => ListingFormError::Malformed(msg),
                        })?;

                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }

                    let media = MediaPayload::new(file_name, content_type, bytes);
                    if name == "image" {
                        form.image = Some(media);
                    } else {
                        form.video = Some(media);
                    }
                }
                "title" | "description" | "price" | "property_type" => {
                    let bytes = read_field(&mut field, MAX_TEXT_FIELD_BYTES)
                        .await
                        .map_err(|e| match e {
                            FieldReadError::TooLarge => ListingFormError::FieldTooLong(name.clone()),
                            FieldReadError::Stream(msg) => ListingFormError::Malformed(msg),
                        })?;
                    let value = String::from_utf8(bytes).map_err(|_| {
                        ListingFormError::Malformed(format!("field '{name}' is not valid UTF-8"))
                    })?;

                    match name.as_str() {
                        "title" => form.title = value,
                        "description" => form.description = value,
                        "price" => form.price = value,
                        _ => form.property_type = value,
                    }
                }
                other => {
                    tracing::debug!(field = %other, "Skipping unknown form field");
                    while let Some(chunk) = field.next().await {
                        chunk.map_err(|e| ListingFormError::Malformed(e.to_string()))?;
                    }
                }
            }
        }

        Ok(form)
    }

    /// Whole number, surrounding whitespace and digit-group spaces allowed.
    pub fn price(&self) -> Result<i64, ListingFormError> {
        let digits: String = self.price.chars().filter(|c| !c.is_whitespace()).collect();
        digits.parse::<i64>().map_err(|_| ListingFormError::InvalidPrice)
    }

    pub fn into_publish_command(self) -> Result<PublishListingCommand, ListingFormError> {
        let price = self.price()?;
        Ok(PublishListingCommand {
            title: self.title,
            description: self.description,
            price,
            property_type: self.property_type,
            image: self.image,
            video: self.video,
        })
    }

    pub fn into_edit_command(self, listing_id: i32) -> Result<EditListingCommand, ListingFormError> {
        let price = self.price()?;
        Ok(EditListingCommand {
            listing_id,
            title: self.title,
            description: self.description,
            price,
            property_type: self.property_type,
            image: self.image,
            video: self.video,
        })
    }
}

async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>, FieldReadError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| FieldReadError::Stream(e.to_string()))?;
        if bytes.len() + chunk.len() > limit {
            return Err(FieldReadError::TooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}
