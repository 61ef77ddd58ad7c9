//! Server-rendered home page.

use std::fmt::Write;

use axum::{extract::State, response::Html};

use crate::app_state::AppState;

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    let mut cards = String::new();
    for p in state.catalog().all() {
        let _ = write!(
            cards,
            "<article class=\"product\" data-id=\"{id}\" data-category=\"{cat}\">\
             <img src=\"{img}\" alt=\"{name}\"><h2>{name}</h2><p>{desc}</p>\
             <span class=\"price\">${price:.2}</span></article>\n",
            id = p.id,
            cat = escape_html(&p.category),
            img = escape_html(&p.image),
            name = escape_html(&p.name),
            desc = escape_html(&p.description),
            price = p.price,
        );
    }

    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
         <title>TechStore</title></head>\n<body>\n<header><h1>TechStore</h1>\
         <p>Laptops, phones, audio and more.</p></header>\n<main>\n{cards}</main>\n\
         <footer>version {version}</footer>\n</body>\n</html>\n",
        version = escape_html(&state.cfg().build.version),
    ))
}
