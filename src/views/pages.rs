use actix_web::HttpResponse;

use super::{escape, layout};
use crate::models::{Entry, SessionUser};

pub fn home(user: &SessionUser) -> HttpResponse {
    let body = format!(
        "<h1>Welcome back, {name}</h1>\n<p>Your diary is waiting. \
         <a href=\"/new/{id}\">Write today's entry</a> or <a href=\"/diary/{id}\">read past ones</a>.</p>",
        name = escape(&user.name),
        id = escape(&user.id),
    );
    layout("Home", Some(user), &body)
}

pub fn login(user: Option<&SessionUser>) -> HttpResponse {
    let body = "<h1>Log in</h1>\n\
        <form class=\"stack\" method=\"POST\" action=\"/login\">\n\
        <label>Email <input type=\"email\" name=\"email\" required></label>\n\
        <label>Password <input type=\"password\" name=\"password\" required></label>\n\
        <button type=\"submit\">Log in</button>\n</form>\n\
        <p>No account yet? <a href=\"/signup\">Sign up</a></p>";
    layout("Log in", user, body)
}

pub fn signup(user: Option<&SessionUser>) -> HttpResponse {
    let body = "<h1>Sign up</h1>\n\
        <form class=\"stack\" method=\"POST\" action=\"/signup\">\n\
        <label>Name <input type=\"text\" name=\"name\" required></label>\n\
        <label>Email <input type=\"email\" name=\"email\" required></label>\n\
        <label>Password <input type=\"password\" name=\"password\" required></label>\n\
        <button type=\"submit\">Create account</button>\n</form>\n\
        <p>Already registered? <a href=\"/login\">Log in</a></p>";
    layout("Sign up", user, body)
}

pub fn about(user: &SessionUser) -> HttpResponse {
    let body = "<h1>About</h1>\n<p>A small private diary. Write dated entries, \
        come back to them, edit or remove them whenever you like.</p>";
    layout("About", Some(user), body)
}

pub fn profile(name: &str, user_id: &str, user: &SessionUser) -> HttpResponse {
    let body = format!(
        "<h1>{name}</h1>\n<p>Account id <code>{id}</code></p>\n\
         <p><a href=\"/diary/{id}\">Open diary</a> · <a href=\"/new/{id}\">New entry</a></p>",
        name = escape(name),
        id = escape(user_id),
    );
    layout("Profile", Some(user), &body)
}

pub fn about_profile(name: &str, user: &SessionUser) -> HttpResponse {
    let body = format!(
        "<h1>About {name}</h1>\n<p>Signed in as {email}.</p>",
        name = escape(name),
        email = escape(&user.email),
    );
    layout("About me", Some(user), &body)
}

pub fn diary(name: &str, log: &[Entry], user: &SessionUser) -> HttpResponse {
    let id = escape(&user.id);
    let mut body = format!("<h1>{}'s diary</h1>\n", escape(name));

    if log.is_empty() {
        body.push_str(&format!(
            "<p>No entries yet. <a href=\"/new/{id}\">Write the first one</a>.</p>"
        ));
    }

    for (index, entry) in log.iter().enumerate() {
        body.push_str(&format!(
            "<article>\n<div class=\"date\">{date}</div>\n<p>{text}</p>\n\
             <div class=\"actions\"><a href=\"/edit/{id}/{index}\">Edit</a>\
             <form method=\"POST\" action=\"/delete/{id}/{index}?_method=DELETE\">\
             <button type=\"submit\">Delete</button></form></div>\n</article>\n",
            date = escape(&entry.date),
            text = escape(&entry.entry),
        ));
    }

    layout("Diary", Some(user), &body)
}

pub fn new_entry(name: &str, user: &SessionUser) -> HttpResponse {
    let body = format!(
        "<h1>New entry for {name}</h1>\n\
         <form class=\"stack\" method=\"POST\" action=\"/new/{id}\">\n\
         <label>Date <input type=\"text\" name=\"date\" required></label>\n\
         <label>Entry <textarea name=\"entry\" required></textarea></label>\n\
         <button type=\"submit\">Save</button>\n</form>",
        name = escape(name),
        id = escape(&user.id),
    );
    layout("New entry", Some(user), &body)
}

pub fn edit_entry(entry: &Entry, index: usize, user_id: &str, user: &SessionUser) -> HttpResponse {
    let body = format!(
        "<h1>Edit entry</h1>\n\
         <form class=\"stack\" method=\"POST\" action=\"/edit/{id}/{index}?_method=PATCH\">\n\
         <input type=\"hidden\" name=\"entry_id\" value=\"{entry_id}\">\n\
         <label>Date <input type=\"text\" name=\"date\" value=\"{date}\" required></label>\n\
         <label>Entry <textarea name=\"entry\" required>{text}</textarea></label>\n\
         <button type=\"submit\">Update</button>\n</form>",
        id = escape(user_id),
        entry_id = escape(&entry.id),
        date = escape(&entry.date),
        text = escape(&entry.entry),
    );
    layout("Edit entry", Some(user), &body)
}
