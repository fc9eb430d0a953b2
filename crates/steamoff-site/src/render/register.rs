//! Registration page.
//!
//! The form posts back to `/register` as multipart. The action button decides
//! what happens: `upload` only offers the chosen file as payment proof, while
//! `submit` (the default) also sends the registration. Values already entered
//! are echoed back so nothing is lost across round trips.

use maud::{Markup, PreEscaped, html};
use steamoff_core::upload::ACCEPT_ATTR;
use steamoff_core::{CONTACT_EMAIL, Cohort, Field, NavState, Notice, RegistrationForm};

use super::components::{OpenGraphData, notice_list, page_shell};
use super::{SHARE_DESCRIPTION, og_image_url};

/// Name of the multipart part carrying the proof file.
pub const FILE_PART: &str = "file";

/// Name of the submit button part.
pub const ACTION_PART: &str = "action";

/// Render the registration page for `form`.
pub fn render(
    form: &RegistrationForm,
    notices: &[Notice],
    nav: &NavState,
    base_url: &str,
    site_name: &str,
) -> Markup {
    let title = format!("Register | {site_name}");
    let canonical = format!("{base_url}/register");
    let image = og_image_url(base_url);

    let og = OpenGraphData {
        title: "Register for SOD 2025",
        description: SHARE_DESCRIPTION,
        og_type: "website",
        image: Some(&image),
        twitter_card_type: "summary_large_image",
    };

    let body = html! {
        (notice_list(notices))
        section class="section register" {
            div class="section-head" {
                h2 class="gradient" { "Register for SOD 2025" }
                p { "Secure your spot at Ghana's most exclusive house party for MSc Business Analytics students." }
            }

            div class="form-card" {
                h3 { "Registration Form" }
                p class="form-help" {
                    "Fill out the form below and upload your proof of payment to register for the event."
                }

                form method="post" action="/register" enctype="multipart/form-data" {
                    div class="form-row" {
                        (text_input(form, Field::FirstName, "text", "Enter your first name"))
                        (text_input(form, Field::LastName, "text", "Enter your last name"))
                    }
                    (text_input(form, Field::Email, "email", "Enter your email address"))
                    (text_input(form, Field::Phone, "tel", "Enter your phone number"))

                    div class="form-field" {
                        label for=(Field::Cohort.name()) { (Field::Cohort.label()) }
                        select id=(Field::Cohort.name()) name=(Field::Cohort.name()) required {
                            @for cohort in Cohort::ALL {
                                option value=(cohort.label()) selected[form.cohort == Some(cohort)] {
                                    (cohort.label())
                                }
                            }
                        }
                    }

                    div class="form-field" {
                        label for="paymentProof" { "Payment Proof" }
                        div class="dropzone" {
                            input type="file" id="paymentProof" name=(FILE_PART) accept=(ACCEPT_ATTR);
                            p class="dropzone-hint" {
                                @if let Some(proof) = form.proof() {
                                    "Selected: " (proof.file_name())
                                } @else {
                                    "JPEG, PNG, PDF - Max 5MB"
                                }
                            }
                            button class="btn btn-outline btn-small" type="submit" name=(ACTION_PART) value="upload" formnovalidate {
                                "Attach file"
                            }
                        }
                    }

                    button class="btn btn-block" type="submit" name=(ACTION_PART) value="submit" {
                        "Register Now"
                    }
                }

                div class="form-footer" {
                    p {
                        "By registering, you agree to our terms and conditions. Your payment will be verified "
                        "within 24-48 hours, after which you'll receive your event pass via email."
                    }
                    p {
                        "For payment details, please contact us at "
                        a href={ "mailto:" (CONTACT_EMAIL) } { (CONTACT_EMAIL) }
                    }
                }
            }
        }
        style { (PreEscaped(REGISTER_CSS)) }
    };

    page_shell(
        &title,
        "Register for Steam-Off Daycation 2025 and upload your proof of payment.",
        &canonical,
        og,
        nav,
        body,
        site_name,
    )
}

fn text_input(form: &RegistrationForm, field: Field, input_type: &str, placeholder: &str) -> Markup {
    html! {
        div class="form-field" {
            label for=(field.name()) { (field.label()) }
            input type=(input_type) id=(field.name()) name=(field.name())
                value=(form.value(field).as_ref()) placeholder=(placeholder) required;
        }
    }
}

const REGISTER_CSS: &str = r#"
.register{padding-top:7rem}
.form-card{max-width:680px;margin:0 auto;background:var(--surface);border:1px solid #222;border-radius:14px;padding:2rem}
.form-card h3{font-size:1.4rem}
.form-help{color:var(--fg2);margin:.35rem 0 1.5rem}
.form-row{display:grid;grid-template-columns:1fr 1fr;gap:1rem}
.form-field{display:flex;flex-direction:column;gap:.4rem;margin-bottom:1.1rem}
.form-field label{font-weight:600;font-size:.9rem}
.form-field input,.form-field select{background:rgba(0,0,0,.5);border:1px solid #333;color:var(--fg);border-radius:8px;padding:.65rem .8rem;font-size:1rem}
.form-field input:focus,.form-field select:focus{outline:none;border-color:var(--accent)}
.dropzone{border:2px dashed #333;border-radius:10px;padding:1.25rem;text-align:center;display:flex;flex-direction:column;gap:.6rem;align-items:center}
.dropzone-hint{color:var(--fg3);font-size:.85rem}
.btn-small{padding:.4rem 1rem;font-size:.85rem}
.btn-block{width:100%;margin-top:.5rem}
.form-footer{margin-top:1.5rem;padding-top:1rem;border-top:1px solid #222;font-size:.85rem;color:var(--fg2)}
.form-footer p+p{margin-top:.5rem}
@media(max-width:640px){.form-row{grid-template-columns:1fr}}
"#;
