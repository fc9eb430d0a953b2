//! HTML rendering for the event site.
//!
//! Each page has its own renderer producing a complete HTML document with
//! Open Graph tags, the shared header and the footer.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic XSS protection (all dynamic values are escaped).

pub mod components;
pub mod faq;
pub mod home;
pub mod register;

/// Description used when a page is shared.
pub const SHARE_DESCRIPTION: &str =
    "Ghana's most exclusive house party for MSc Business Analytics students. Register now!";

/// Absolute URL of the generated share image.
pub fn og_image_url(base_url: &str) -> String {
    format!("{base_url}/opengraph-image.png")
}
