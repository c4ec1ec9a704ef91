use actix_web::http::header::CONTENT_TYPE;
use actix_web::test::TestRequest;

use crate::tests::support::listing_fixtures::LISTING_DESCRIPTION;

const BOUNDARY: &str = "----immo-test-boundary";

/// Hand-built `multipart/form-data` body for route tests.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Valid text fields of a rental listing.
    pub fn listing_fields(self) -> Self {
        self.text("title", "Appartement 3 pièces")
            .text("description", LISTING_DESCRIPTION)
            .text("price", "500000")
            .text("property_type", "location")
    }

    pub fn jpeg(self) -> Self {
        self.file("image", "salon.jpg", "image/jpeg", &[0xFF, 0xD8, 0xFF, 0xE0])
    }

    pub fn into_request(mut self, request: TestRequest) -> TestRequest {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        request
            .insert_header((
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(self.body)
    }
}
