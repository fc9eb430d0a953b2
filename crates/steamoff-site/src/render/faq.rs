//! Frequently asked questions.

use maud::{Markup, PreEscaped, html};
use steamoff_core::upload::MAX_UPLOAD_BYTES;
use steamoff_core::{CONTACT_EMAIL, NavState};

use super::components::{OpenGraphData, page_shell};
use super::{SHARE_DESCRIPTION, og_image_url};

/// Render the FAQ page.
pub fn render(nav: &NavState, base_url: &str, site_name: &str) -> Markup {
    let title = format!("FAQs | {site_name}");
    let canonical = format!("{base_url}/faqs");
    let image = og_image_url(base_url);
    let max_mb = MAX_UPLOAD_BYTES / (1024 * 1024);

    let og = OpenGraphData {
        title: "SOD 2025 FAQs",
        description: SHARE_DESCRIPTION,
        og_type: "website",
        image: Some(&image),
        twitter_card_type: "summary_large_image",
    };

    let faqs: [(&str, Markup); 6] = [
        (
            "When and where is the event?",
            html! { "Thursday, March 6, 2025 at the New Joko Hotel, Achimota." },
        ),
        (
            "Who can attend?",
            html! {
                "The daycation is for MSc Business Analytics students of the University of Ghana "
                "Business School. Guests can register by choosing \"Guest\" as their cohort."
            },
        ),
        (
            "How much does it cost?",
            html! { "All attendees must pay to participate. The event cost is yet to be confirmed." },
        ),
        (
            "How do I register?",
            html! {
                "Fill in the " a href="/register" { "registration form" }
                " and attach your proof of payment as a JPEG, PNG or PDF of at most "
                (max_mb) "MB."
            },
        ),
        (
            "When will I get my event pass?",
            html! {
                "Payments are verified within 24-48 hours, after which your event pass is sent by email."
            },
        ),
        (
            "How do I get payment details?",
            html! {
                "Contact us at " a href={ "mailto:" (CONTACT_EMAIL) } { (CONTACT_EMAIL) } "."
            },
        ),
    ];

    let body = html! {
        section class="section faqs" {
            div class="section-head" {
                h2 class="gradient" { "Frequently Asked Questions" }
                p { "Everything you need to know before the daycation." }
            }
            div class="faq-list" {
                @for (question, answer) in &faqs {
                    details class="faq" {
                        summary { (question) }
                        p { (answer) }
                    }
                }
            }
            div class="faq-cta" {
                a class="btn" href="/register" { "Register Now" }
            }
        }
        style { (PreEscaped(FAQ_CSS)) }
    };

    page_shell(
        &title,
        "Answers to common questions about Steam-Off Daycation 2025.",
        &canonical,
        og,
        nav,
        body,
        site_name,
    )
}

const FAQ_CSS: &str = r#"
.faqs{padding-top:7rem}
.faq-list{max-width:760px;margin:0 auto;display:flex;flex-direction:column;gap:.75rem}
.faq{background:var(--surface);border:1px solid var(--border);border-radius:10px;padding:1rem 1.25rem}
.faq summary{cursor:pointer;font-weight:600}
.faq p{color:var(--fg2);margin-top:.6rem}
.faq-cta{text-align:center;margin-top:2.5rem}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faq_page() {
        let html = render(&NavState::default(), "http://localhost:8080", "SOD").into_string();
        assert!(html.contains("<title>FAQs | SOD</title>"));
        assert_eq!(html.matches(r#"<details class="faq">"#).count(), 6);
        assert!(html.contains("at most 5MB"));
        assert!(html.contains("mailto:steamoffdaycation@gmail.com"));
    }
}
