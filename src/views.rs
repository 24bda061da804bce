//! Server-rendered pages. Plain string rendering, no template engine.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::{
    flash::Flash,
    models::{BhkType, House, HouseImage},
};

/// Per-request rendering context: who is logged in, plus pending notices.
#[derive(Debug, Default)]
pub struct PageCtx {
    pub owner_name: Option<String>,
    pub flashes: Vec<Flash>,
}

pub fn escape(s: &str) -> String {
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

fn layout(ctx: &PageCtx, title: &str, body: &str) -> String {
    let mut nav = String::new();
    nav.push_str(r#"<a href="/">Home</a>"#);
    for bhk in BhkType::ALL {
        let _ = write!(
            nav,
            r#" <a href="/list/{}">{}</a>"#,
            bhk.as_str().to_ascii_lowercase(),
            bhk.as_str()
        );
    }
    match &ctx.owner_name {
        Some(name) => {
            let _ = write!(
                nav,
                r#" <a href="/owner">Dashboard ({})</a> <a href="/owner/add">Add house</a> <a href="/logout">Logout</a>"#,
                escape(name)
            );
        }
        None => {
            nav.push_str(r#" <a href="/register">Register</a> <a href="/login">Login</a>"#);
        }
    }

    let mut flashes = String::new();
    for flash in &ctx.flashes {
        let _ = write!(
            flashes,
            r#"<p class="flash flash-{}">{}</p>"#,
            flash.level.as_str(),
            escape(&flash.message)
        );
    }

    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body><nav>{nav}</nav>{flashes}<main>{body}</main></body></html>",
        title = escape(title),
    )
}

fn format_time(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn house_card(house: &House) -> String {
    format!(
        r#"<article class="house"><h3><a href="/house/{id}">{title}</a></h3>
<p>{bhk} &middot; rent {rent} &middot; {address}</p>
<p class="listed">listed {listed}</p></article>"#,
        id = house.id,
        title = escape(&house.title),
        bhk = escape(&house.bhk_type),
        rent = house.rent,
        address = escape(&house.address),
        listed = format_time(&house.created_at),
    )
}

fn house_list(houses: &[House]) -> String {
    if houses.is_empty() {
        return "<p>No houses listed yet.</p>".to_string();
    }
    houses.iter().map(house_card).collect()
}

pub fn home(ctx: &PageCtx, latest: &[House]) -> String {
    let body = format!("<h1>Latest listings</h1>{}", house_list(latest));
    layout(ctx, "Rentals", &body)
}

pub fn listing(ctx: &PageCtx, bhk: BhkType, houses: &[House]) -> String {
    let body = format!(
        "<h1>{} listings</h1>{}",
        bhk.as_str(),
        house_list(houses)
    );
    layout(ctx, &format!("{} listings", bhk.as_str()), &body)
}

pub fn house_detail(ctx: &PageCtx, house: &House, images: &[HouseImage]) -> String {
    let mut gallery = String::new();
    for image in images {
        let _ = write!(
            gallery,
            r#"<img src="/uploads/{}" alt="{}">"#,
            escape(&image.filename),
            escape(&house.title)
        );
    }

    let description = house
        .description
        .as_deref()
        .map(|d| format!("<p>{}</p>", escape(d)))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>{title}</h1>
<p>{bhk} &middot; rent {rent}</p>
<p>{address}</p>
{description}
<div class="gallery">{gallery}</div>
<h2>Request a visit</h2>
<form method="post" action="/book/{id}">
<label>Name <input name="name" required></label>
<label>Email <input name="email" type="email" required></label>
<label>Phone <input name="phone"></label>
<label>Date <input name="date" type="datetime-local" required></label>
<button type="submit">Book visit</button>
</form>"#,
        title = escape(&house.title),
        bhk = escape(&house.bhk_type),
        rent = house.rent,
        address = escape(&house.address),
        id = house.id,
    );
    layout(ctx, &house.title, &body)
}

pub fn register_page(ctx: &PageCtx) -> String {
    let body = r#"<h1>Register</h1>
<form method="post" action="/register">
<label>Name <input name="name" required></label>
<label>Email <input name="email" type="email" required></label>
<label>Password <input name="password" type="password" required></label>
<label>Phone <input name="phone"></label>
<button type="submit">Register</button>
</form>"#;
    layout(ctx, "Register", body)
}

pub fn login_page(ctx: &PageCtx) -> String {
    let body = r#"<h1>Login</h1>
<form method="post" action="/login">
<label>Email <input name="email" type="email" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Login</button>
</form>"#;
    layout(ctx, "Login", body)
}

pub fn dashboard(ctx: &PageCtx, houses: &[House]) -> String {
    let body = format!(
        r#"<h1>Your listings</h1><p><a href="/owner/add">Add a house</a></p>{}"#,
        house_list(houses)
    );
    layout(ctx, "Dashboard", &body)
}

pub fn add_house_page(ctx: &PageCtx) -> String {
    let mut options = String::new();
    for bhk in BhkType::ALL {
        let _ = write!(
            options,
            r#"<option value="{v}">{v}</option>"#,
            v = bhk.as_str()
        );
    }
    let body = format!(
        r#"<h1>Add a house</h1>
<form method="post" action="/owner/add" enctype="multipart/form-data">
<label>Title <input name="title" required></label>
<label>Type <select name="bhk_type">{options}</select></label>
<label>Rent <input name="rent" type="number" required></label>
<label>Address <input name="address" required></label>
<label>Description <textarea name="description"></textarea></label>
<label>Images <input name="images" type="file" multiple accept="image/*"></label>
<button type="submit">Add house</button>
</form>"#
    );
    layout(ctx, "Add a house", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let ctx = PageCtx::default();
    let body = format!(
        "<h1>{}</h1><p>{}</p><p><a href=\"/\">Back to listings</a></p>",
        status.as_u16(),
        escape(message)
    );
    layout(&ctx, &status.to_string(), &body)
}
