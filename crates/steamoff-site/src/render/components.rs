//! Shared HTML components used across all pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use std::sync::LazyLock;

use maud::{Markup, PreEscaped, html};
use steamoff_core::nav::{NAV_LINKS, OUTSIDE_CLICK_DELAY, SCROLL_THRESHOLD_PX};
use steamoff_core::{CONTACT_EMAIL, Countdown, NavState, Notice, NoticeLevel};

/// Inline CSS for all pages.
///
/// Dark background with an orange-to-red accent, matching the event's
/// printed material.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#050505;--fg:#f5f5f5;--fg2:#b3b3b3;--fg3:#777;--accent:#ff9500;--accent2:#ff3b00;--accent-hover:#ffad33;--surface:rgba(255,255,255,.04);--border:rgba(255,149,0,.25)}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column}
main{flex:1;width:100%}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
.gradient{background:linear-gradient(to right,var(--accent),var(--accent2));-webkit-background-clip:text;background-clip:text;color:transparent}
.section{max-width:1080px;margin:0 auto;padding:4.5rem 1.25rem}
.section-head{text-align:center;margin-bottom:2.5rem}
.section-head h2{font-size:2.2rem;font-weight:800;margin-bottom:.75rem}
.section-head p{color:var(--fg2);max-width:640px;margin:0 auto}

.site-header{position:fixed;top:0;left:0;right:0;z-index:50;transition:background .25s,box-shadow .25s}
.site-header.scrolled{background:rgba(5,5,5,.92);box-shadow:0 1px 0 var(--border)}
.nav{max-width:1080px;margin:0 auto;display:flex;align-items:center;justify-content:space-between;padding:1rem 1.25rem}
.brand{font-weight:800;font-size:1.25rem;letter-spacing:-.02em;color:var(--fg)}
.brand:hover{text-decoration:none}
.nav-links{display:flex;gap:1.75rem;align-items:center}
.nav-links a{color:var(--fg2);font-weight:500}
.nav-links a:hover{color:var(--accent);text-decoration:none}
.menu-toggle{display:none;color:var(--fg);font-size:1.5rem;line-height:1;padding:.25rem .5rem}
.menu-toggle:hover{text-decoration:none}
.mobile-menu{display:none}
.btn{display:inline-block;padding:.7rem 1.5rem;border-radius:8px;font-weight:600;background:var(--accent);color:#000;border:1px solid var(--accent);cursor:pointer;font-size:1rem;transition:background .15s,transform .15s}
.btn:hover{background:var(--accent-hover);text-decoration:none;transform:scale(1.03)}
.btn-outline{background:transparent;color:var(--accent)}
.btn-outline:hover{background:rgba(255,149,0,.1)}
@media(max-width:760px){
.nav-links{display:none}
.menu-toggle{display:block}
.mobile-menu.open{display:flex;flex-direction:column;gap:1rem;padding:1rem 1.25rem 1.5rem;background:rgba(5,5,5,.97);border-bottom:1px solid var(--border)}
.mobile-menu a{color:var(--fg);font-size:1.1rem}
}

.toasts{position:fixed;top:4.5rem;right:1rem;z-index:60;display:flex;flex-direction:column;gap:.5rem;max-width:360px}
.toast{padding:.75rem 1rem;border-radius:8px;font-size:.95rem;background:#141414;border-left:4px solid var(--accent)}
.toast.success{border-left-color:#22c55e}
.toast.error{border-left-color:#ef4444}

.countdown{display:grid;grid-template-columns:repeat(4,minmax(0,1fr));gap:.75rem;max-width:520px;margin:2rem auto}
.countdown-item{background:var(--surface);border:1px solid var(--border);border-radius:10px;padding:1rem .5rem;text-align:center}
.countdown-value{display:block;font-size:2.2rem;font-weight:800;color:var(--accent);font-variant-numeric:tabular-nums}
.countdown-label{font-size:.8rem;color:var(--fg3);text-transform:uppercase;letter-spacing:.08em}
.countdown-finished{text-align:center;font-size:1.25rem;font-weight:600;color:var(--accent);margin:2rem 0}

.footer{text-align:center;padding:2rem 1rem;font-size:.85rem;color:var(--fg3);border-top:1px solid var(--border)}
.footer p+p{margin-top:.35rem}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#050505;color:#f5f5f5;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#b3b3b3;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#ff9500}
"#;

/// Content-Security-Policy header value.
///
/// Allows inline styles and the site's own inline scripts (navigation and
/// the live countdown). Forms may only post back to this origin.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; script-src 'unsafe-inline'; img-src 'self' https: data:; connect-src 'self'; form-action 'self'; base-uri 'none'; frame-ancestors 'none'";

/// Render the full HTML page shell with `<head>`, OG tags, header and footer.
pub fn page_shell(
    title: &str,
    description: &str,
    canonical_url: &str,
    og: OpenGraphData<'_>,
    nav: &NavState,
    body_content: Markup,
    site_name: &str,
) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                link rel="canonical" href=(canonical_url);

                // Open Graph
                meta property="og:title" content=(og.title);
                meta property="og:description" content=(og.description);
                meta property="og:url" content=(canonical_url);
                meta property="og:site_name" content=(site_name);
                meta property="og:type" content=(og.og_type);
                @if let Some(image) = og.image {
                    meta property="og:image" content=(image);
                    meta property="og:image:width" content="1200";
                    meta property="og:image:height" content="630";
                }

                // Twitter Card
                meta name="twitter:card" content=(og.twitter_card_type);
                meta name="twitter:title" content=(og.title);
                meta name="twitter:description" content=(og.description);
                @if let Some(image) = og.image {
                    meta name="twitter:image" content=(image);
                }

                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                (site_header(nav))
                main { (body_content) }
                (footer(site_name))
                script { (PreEscaped(NAV_SCRIPT.as_str())) }
            }
        }
    }
}

/// Open Graph metadata for a page.
pub struct OpenGraphData<'a> {
    /// OG title.
    pub title: &'a str,
    /// OG description.
    pub description: &'a str,
    /// OG type (e.g., "website").
    pub og_type: &'a str,
    /// Absolute OG image URL.
    pub image: Option<&'a str>,
    /// Twitter card type ("summary", "summary_large_image").
    pub twitter_card_type: &'a str,
}

/// Fixed header with desktop links, the mobile menu toggle and the menu.
///
/// Without scripts the toggle is a plain link to `?menu=open`, which renders
/// the page with the menu expanded.
pub fn site_header(nav: &NavState) -> Markup {
    let toggle_href = if nav.is_menu_open() { "?" } else { "?menu=open" };
    html! {
        header class=(nav.header_class()) {
            nav class="nav" {
                a class="brand" href="/" { "SOD " span class="gradient" { "2025" } }
                div class="nav-links" {
                    @for (label, href) in NAV_LINKS {
                        a href=(href) { (label) }
                    }
                    a class="btn" href="/register" { "Register Now" }
                }
                a class="menu-toggle" href=(toggle_href) aria-controls="mobile-menu"
                    aria-expanded=(if nav.is_menu_open() { "true" } else { "false" })
                    aria-label="Toggle menu" {
                    @if nav.is_menu_open() { "\u{2715}" } @else { "\u{2630}" }
                }
            }
            div id="mobile-menu" class=(nav.menu_class()) {
                @for (label, href) in NAV_LINKS {
                    a href=(href) { (label) }
                }
                a class="btn" href="/register" { "Register Now" }
            }
        }
    }
}

/// Transient notices, newest last.
pub fn notice_list(notices: &[Notice]) -> Markup {
    html! {
        @if !notices.is_empty() {
            div class="toasts" role="status" aria-live="polite" {
                @for notice in notices {
                    div class={ "toast " (level_class(notice.level)) } { (notice.message) }
                }
            }
        }
    }
}

fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "success",
        NoticeLevel::Error => "error",
    }
}

/// Countdown grid, kept live by [`COUNTDOWN_SCRIPT`] where scripts run.
pub fn countdown_grid(countdown: &Countdown) -> Markup {
    let units = [
        ("days", "Days", countdown.days),
        ("hours", "Hours", countdown.hours),
        ("minutes", "Minutes", countdown.minutes),
        ("seconds", "Seconds", countdown.seconds),
    ];

    html! {
        div id="countdown" class="countdown" data-finished=(if countdown.is_finished() { "true" } else { "false" }) {
            @for (unit, label, value) in units {
                div class="countdown-item" {
                    span class="countdown-value" data-unit=(unit) { (value) }
                    span class="countdown-label" { (label) }
                }
            }
        }
        @if countdown.is_finished() {
            p class="countdown-finished" { "The daycation is here!" }
        } @else {
            script { (PreEscaped(COUNTDOWN_SCRIPT)) }
        }
    }
}

/// Site footer with the contact address.
pub fn footer(site_name: &str) -> Markup {
    html! {
        footer class="footer" {
            p {
                "Questions? Contact us at "
                a href={ "mailto:" (CONTACT_EMAIL) } { (CONTACT_EMAIL) }
            }
            p { (site_name) " \u{00b7} University of Ghana Business School" }
        }
    }
}

/// Scroll and outside-click behaviour for the header.
///
/// Listeners are dropped on `pagehide` so a page restored from the
/// back/forward cache does not stack a second set.
pub static NAV_SCRIPT: LazyLock<String> = LazyLock::new(|| {
    format!(
        r#"(function(){{
var h=document.querySelector('.site-header'),b=document.querySelector('.menu-toggle'),m=document.getElementById('mobile-menu');
if(!h||!b||!m)return;
var openedAt=0;
function onScroll(){{h.classList.toggle('scrolled',window.scrollY>{threshold});}}
function close(){{m.classList.remove('open');b.setAttribute('aria-expanded','false');}}
function onToggle(e){{e.preventDefault();var o=m.classList.toggle('open');b.setAttribute('aria-expanded',o?'true':'false');if(o)openedAt=Date.now();}}
function onOutside(e){{if(!m.classList.contains('open')||Date.now()-openedAt<{delay})return;if(m.contains(e.target)||b.contains(e.target))return;close();}}
b.addEventListener('click',onToggle);
window.addEventListener('scroll',onScroll,{{passive:true}});
document.addEventListener('click',onOutside);
window.addEventListener('pagehide',function(){{b.removeEventListener('click',onToggle);window.removeEventListener('scroll',onScroll);document.removeEventListener('click',onOutside);}},{{once:true}});
onScroll();
}})();"#,
        threshold = SCROLL_THRESHOLD_PX,
        delay = OUTSIDE_CLICK_DELAY.as_millis(),
    )
});

/// Subscribes to the countdown stream and closes it once the event starts.
pub const COUNTDOWN_SCRIPT: &str = r#"(function(){
var el=document.getElementById('countdown');
if(!el||!window.EventSource||el.dataset.finished==='true')return;
var es=new EventSource('/api/countdown/stream');
es.addEventListener('tick',function(e){
var c=JSON.parse(e.data);
['days','hours','minutes','seconds'].forEach(function(k){var n=el.querySelector('[data-unit="'+k+'"]');if(n)n.textContent=c[k];});
if(c.finished){es.close();el.dataset.finished='true';}
});
window.addEventListener('pagehide',function(){es.close();},{once:true});
})();"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_reflects_nav_state() {
        let closed = site_header(&NavState::rendered(false)).into_string();
        assert!(closed.contains(r#"class="mobile-menu""#));
        assert!(closed.contains(r#"href="?menu=open""#));

        let open = site_header(&NavState::rendered(true)).into_string();
        assert!(open.contains(r#"class="mobile-menu open""#));
        assert!(open.contains(r#"aria-expanded="true""#));
    }

    #[test]
    fn test_nav_script_uses_shared_constants() {
        assert!(NAV_SCRIPT.contains("window.scrollY>10"));
        assert!(NAV_SCRIPT.contains("Date.now()-openedAt<100"));
        assert!(NAV_SCRIPT.contains("pagehide"));
    }

    #[test]
    fn test_notice_list_escapes_messages() {
        let html = notice_list(&[Notice::file_selected("<b>.png")]).into_string();
        assert!(html.contains("toast success"));
        assert!(html.contains("&lt;b&gt;.png"));
    }

    #[test]
    fn test_empty_notice_list_renders_nothing() {
        assert_eq!(notice_list(&[]).into_string(), "");
    }

    #[test]
    fn test_countdown_grid_values() {
        let c = Countdown {
            days: 3,
            hours: 4,
            minutes: 5,
            seconds: 6,
            finished: false,
        };
        let html = countdown_grid(&c).into_string();
        assert!(html.contains(r#"data-unit="days">3<"#));
        assert!(html.contains(r#"data-unit="seconds">6<"#));
        assert!(html.contains("EventSource"));
    }

    #[test]
    fn test_finished_countdown_has_no_stream() {
        let html = countdown_grid(&Countdown::FINISHED).into_string();
        assert!(html.contains(r#"data-finished="true""#));
        assert!(!html.contains("EventSource"));
    }
}
