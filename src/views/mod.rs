//! Server-rendered HTML pages.
//!
//! Every piece of user-supplied text goes through [`escape`] before it is
//! placed in markup.

mod pages;

pub use pages::*;

use actix_web::HttpResponse;

use crate::models::SessionUser;

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:46rem;margin:0 auto;padding:0 1rem;color:#222}\
nav{display:flex;gap:1rem;padding:1rem 0;border-bottom:1px solid #ddd;margin-bottom:1.5rem}\
nav a{color:#345;text-decoration:none}\
form.stack{display:flex;flex-direction:column;gap:.6rem;max-width:28rem}\
textarea{min-height:10rem}\
article{border-bottom:1px solid #eee;padding:.8rem 0}\
article .date{color:#777;font-size:.9rem}\
.actions{display:flex;gap:.8rem;align-items:center}\
.actions form{margin:0}";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn nav(user: Option<&SessionUser>) -> String {
    let mut links = String::new();
    match user {
        Some(user) => {
            let id = escape(&user.id);
            links.push_str(&format!(
                "<a href=\"/\">Home</a>\
                 <a href=\"/profile/{id}\">Profile</a>\
                 <a href=\"/diary/{id}\">Diary</a>\
                 <a href=\"/new/{id}\">New entry</a>\
                 <a href=\"/about/{id}\">About me</a>\
                 <a href=\"/about\">About</a>\
                 <a href=\"/logout\">Log out ({name})</a>",
                id = id,
                name = escape(&user.name),
            ));
        }
        None => links.push_str("<a href=\"/login\">Log in</a><a href=\"/signup\">Sign up</a>"),
    }
    format!("<nav>{links}</nav>")
}

/// Wraps a page body in the shared layout.
pub fn layout(title: &str, user: Option<&SessionUser>, body: &str) -> HttpResponse {
    let html = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} · Diary</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{nav}\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
        nav = nav(user),
    );
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
