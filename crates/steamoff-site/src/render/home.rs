//! Landing page: hero with countdown, activities and venue.

use maud::{Markup, PreEscaped, html};
use steamoff_core::{Countdown, NavState};

use super::components::{OpenGraphData, countdown_grid, page_shell};
use super::{SHARE_DESCRIPTION, og_image_url};

/// One entry in the activities grid.
struct Activity {
    title: &'static str,
    description: &'static str,
    icon: &'static str,
}

const ACTIVITIES: [Activity; 6] = [
    Activity {
        title: "Swimming Pool",
        description: "Take a refreshing dip in the pool or lounge by the water with your classmates in a relaxed atmosphere.",
        icon: "\u{1f3ca}",
    },
    Activity {
        title: "Talks & Discussions",
        description: "Engage in insightful conversations with peers and guest speakers on topics relevant to business analytics and career development.",
        icon: "\u{1f4ac}",
    },
    Activity {
        title: "Karaoke Madness",
        description: "Show off your vocal talents or just have a laugh with friends as you sing along to your favorite tunes.",
        icon: "\u{1f3a4}",
    },
    Activity {
        title: "Card & Board Games",
        description: "Challenge your classmates to friendly competitions with a variety of card and board games to test your strategy and luck.",
        icon: "\u{1f0cf}",
    },
    Activity {
        title: "Movie Session",
        description: "Relax with a curated selection of films in a comfortable setting with your fellow students.",
        icon: "\u{1f3ac}",
    },
    Activity {
        title: "Video Games",
        description: "Compete in various video game tournaments or just play casually with friends on multiple gaming consoles.",
        icon: "\u{1f3ae}",
    },
];

const AMENITIES: [&str; 6] = [
    "Swimming pool",
    "Comfortable seating for talks and discussions",
    "Karaoke setup",
    "Card and board games",
    "Movie screening area",
    "Video game consoles",
];

/// Render the landing page.
pub fn render(countdown: &Countdown, nav: &NavState, base_url: &str, site_name: &str) -> Markup {
    let title = format!("{site_name} | University of Ghana Business School");
    let description = "Join the Steam-Off Daycation 2025 event for MSc Business Analytics students at the University of Ghana Business School. Register now!";
    let canonical = format!("{base_url}/");
    let image = og_image_url(base_url);

    let og = OpenGraphData {
        title: "Steam-Off Daycation 2025 | UGBS",
        description: SHARE_DESCRIPTION,
        og_type: "website",
        image: Some(&image),
        twitter_card_type: "summary_large_image",
    };

    let body = html! {
        section class="hero" {
            div class="hero-inner" {
                h1 class="hero-title gradient" { (site_name) }
                p class="hero-tagline" {
                    "An intimate, carefully curated experience designed for MSc Business Analytics students. "
                    "Unwind in a serene setting with vibrant African-inspired ambiance, refreshing drinks, and unforgettable connections."
                }
                p class="hero-note" {
                    "All attendees must pay to participate. Event cost is yet to be confirmed."
                }
                (countdown_grid(countdown))
                div class="hero-actions" {
                    a class="btn" href="/register" { "Register Now" }
                    a class="btn btn-outline" href="/faqs" { "Learn More" }
                }
            }
        }

        section class="section" id="activities" {
            div class="section-head" {
                h2 class="gradient" { "Activities" }
                p { "Connect with classmates in a relaxed and fun environment." }
            }
            div class="features" {
                @for activity in &ACTIVITIES {
                    article class="feature" {
                        span class="feature-icon" aria-hidden="true" { (activity.icon) }
                        h3 { (activity.title) }
                        p { (activity.description) }
                    }
                }
            }
            div class="memories" {
                h3 { "Create Lasting Memories" }
                p { "Connect with classmates in a relaxed and fun environment" }
            }
        }

        section class="section" id="venue" {
            div class="section-head" {
                h2 class="gradient" { "Venue" }
                p {
                    "Join us on March 6, 2025 at the New Joko Hotel, Achimota. "
                    "Explore the wonderful combination of friendship and fun with the people who make your life better."
                }
            }
            div class="venue" {
                div class="venue-block" {
                    h3 { "A Friendly Gathering" }
                    p {
                        "Our venue embodies the warmth and vibrancy of Ghanaian hospitality. Nestled in a serene environment, "
                        "it offers the perfect backdrop for meaningful connections and joyful celebrations with your classmates."
                    }
                }
                div class="venue-block" {
                    h3 { "Exclusive Event" }
                    p {
                        "SOD 2025 will take place at the New Joko Hotel, Achimota, featuring spacious indoor and outdoor areas, "
                        "a swimming pool, and comfortable spaces for all planned activities."
                    }
                }
                div class="venue-block" {
                    h3 { "Amenities" }
                    ul class="amenities" {
                        @for amenity in AMENITIES {
                            li { span class="tick" { "\u{2713}" } " " (amenity) }
                        }
                    }
                }
                div class="venue-block" {
                    h3 { "Getting There" }
                    p {
                        "Transportation details and directions will be provided to confirmed attendees closer to the event date. "
                        "Parking information will be included."
                    }
                }
            }
        }

        style { (PreEscaped(HOME_CSS)) }
    };

    page_shell(&title, description, &canonical, og, nav, body, site_name)
}

/// Additional CSS for the landing page only.
const HOME_CSS: &str = r#"
.hero{min-height:100vh;display:flex;align-items:center;justify-content:center;text-align:center;padding:6rem 1.25rem 3rem;background:radial-gradient(ellipse at top,rgba(255,149,0,.18),transparent 60%)}
.hero-inner{max-width:760px}
.hero-title{font-size:3.4rem;font-weight:900;letter-spacing:-.03em;line-height:1.1}
.hero-tagline{font-size:1.15rem;color:var(--fg2);margin-top:1.25rem}
.hero-note{font-size:.95rem;color:var(--accent);margin-top:.75rem}
.hero-actions{display:flex;gap:1rem;justify-content:center;flex-wrap:wrap}
.features{display:grid;grid-template-columns:repeat(auto-fit,minmax(280px,1fr));gap:1.25rem}
.feature{background:var(--surface);border:1px solid var(--border);border-radius:12px;padding:1.5rem}
.feature-icon{font-size:2rem;display:block;margin-bottom:.75rem}
.feature h3{font-size:1.2rem;margin-bottom:.5rem}
.feature p{color:var(--fg2);font-size:.95rem}
.memories{margin-top:2.5rem;text-align:center;padding:2.5rem 1rem;border-radius:12px;background:linear-gradient(135deg,rgba(255,149,0,.2),rgba(255,59,0,.15))}
.memories h3{font-size:1.6rem;margin-bottom:.5rem}
.venue{display:grid;grid-template-columns:repeat(auto-fit,minmax(300px,1fr));gap:1.25rem}
.venue-block{background:var(--surface);border:1px solid var(--border);border-radius:12px;padding:1.5rem}
.venue-block h3{margin-bottom:.6rem}
.venue-block p,.amenities{color:var(--fg2)}
.amenities{list-style:none;display:grid;gap:.4rem}
.tick{color:var(--accent)}
@media(max-width:760px){.hero-title{font-size:2.3rem}}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_has_sections_and_meta() {
        let html = render(
            &Countdown::default(),
            &NavState::default(),
            "https://sod.example",
            "Steam-Off Daycation 2025",
        )
        .into_string();

        assert!(html.contains("Steam-Off Daycation 2025 | University of Ghana Business School"));
        assert!(html.contains(r#"content="https://sod.example/opengraph-image.png""#));
        assert!(html.contains("Karaoke Madness"));
        assert!(html.contains("New Joko Hotel, Achimota"));
        assert!(html.contains(r#"href="/faqs""#));
        assert_eq!(html.matches(r#"class="feature""#).count(), 6);
    }
}
