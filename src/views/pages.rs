use std::fmt::Write;

use axum::response::Html;

use crate::api::forms::SetForm;
use crate::model::{LegoSet, Theme};
use crate::views::layout::{escape, render};

pub fn home() -> Html<String> {
    let body = r#"
        <h1>LEGO Collection</h1>
        <p>Browse the catalog by theme, look up a set by its number, or add a new one.</p>
        <p><a href="/lego/sets">View all sets</a></p>
    "#;
    Html(render("Home", "/", body))
}

pub fn about() -> Html<String> {
    let body = r#"
        <h1>About</h1>
        <p>A small catalog of LEGO sets grouped by theme, backed by PostgreSQL.</p>
    "#;
    Html(render("About", "/about", body))
}

pub fn sets(sets: &[LegoSet], theme: Option<&str>, page: &str) -> Html<String> {
    let mut rows = String::new();
    for set in sets {
        let num = escape(&set.set_num);
        let _ = write!(
            rows,
            r#"
            <tr>
                <td><img src="{img}" alt="{name}" width="80"></td>
                <td><a href="/lego/sets/{num}">{name}</a></td>
                <td>{year}</td>
                <td>{parts}</td>
                <td>{theme}</td>
                <td><a href="/lego/editSet/{num}">Edit</a></td>
            </tr>"#,
            img = escape(&set.img_url),
            name = escape(&set.name),
            year = set.year,
            parts = set.num_parts,
            theme = escape(&set.theme.name),
        );
    }

    let heading = match theme {
        Some(theme) => format!("Sets in themes matching &quot;{}&quot;", escape(theme)),
        None => "All Sets".to_string(),
    };
    let body = format!(
        r#"
        <h1>{heading}</h1>
        <form method="get" action="/lego/sets">
            <input type="text" name="theme" placeholder="Filter by theme" value="{filter}">
            <button type="submit">Filter</button>
        </form>
        <table>
            <thead>
                <tr><th></th><th>Name</th><th>Year</th><th>Parts</th><th>Theme</th><th></th></tr>
            </thead>
            <tbody>{rows}
            </tbody>
        </table>
        "#,
        filter = escape(theme.unwrap_or_default()),
    );
    Html(render("Sets", page, &body))
}

pub fn set_detail(set: &LegoSet, page: &str) -> Html<String> {
    let num = escape(&set.set_num);
    let body = format!(
        r#"
        <h1>{name}</h1>
        <img src="{img}" alt="{name}">
        <dl>
            <dt>Set number</dt><dd>{num}</dd>
            <dt>Year</dt><dd>{year}</dd>
            <dt>Parts</dt><dd>{parts}</dd>
            <dt>Theme</dt><dd>{theme}</dd>
        </dl>
        <p>
            <a href="/lego/editSet/{num}">Edit</a>
            <a href="/lego/deleteSet/{num}">Delete</a>
            <a href="/lego/sets">Back to sets</a>
        </p>
        "#,
        name = escape(&set.name),
        img = escape(&set.img_url),
        year = set.year,
        parts = set.num_parts,
        theme = escape(&set.theme.name),
    );
    Html(render(&set.name, page, &body))
}

fn theme_options(themes: &[Theme], selected: &str) -> String {
    let mut options = String::new();
    for theme in themes {
        let id = theme.id.to_string();
        let flag = if id == selected.trim() { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{id}"{flag}>{name}</option>"#,
            name = escape(&theme.name),
        );
    }
    options
}

/// Shared add/edit form. `set_num` is read-only when editing since it
/// identifies the row being changed.
fn set_form(action: &str, form: &SetForm, themes: &[Theme], editing: bool) -> String {
    let field = |name: &str| escape(form.value(name));
    let set_num_attrs = if editing { " readonly" } else { "" };

    format!(
        r#"
        <form method="post" action="{action}">
            <label>Set number <input type="text" name="set_num" value="{set_num}" required{set_num_attrs}></label>
            <label>Name <input type="text" name="name" value="{name}" required></label>
            <label>Year <input type="number" name="year" value="{year}" required></label>
            <label>Parts <input type="number" name="num_parts" value="{num_parts}" required></label>
            <label>Theme <select name="theme_id" required>{options}</select></label>
            <label>Image URL <input type="url" name="img_url" value="{img_url}" required></label>
            <button type="submit">Save</button>
        </form>
        "#,
        set_num = field("set_num"),
        name = field("name"),
        year = field("year"),
        num_parts = field("num_parts"),
        img_url = field("img_url"),
        options = theme_options(themes, form.value("theme_id")),
    )
}

pub fn add_set(themes: &[Theme], form: &SetForm, error: Option<&str>) -> Html<String> {
    let alert = error
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape(message)))
        .unwrap_or_default();
    let body = format!(
        "<h1>Add a Set</h1>\n{alert}{form}",
        form = set_form("/lego/addSet", form, themes, false),
    );
    Html(render("Add Set", "/lego/addSet", &body))
}

pub fn edit_set(set: &LegoSet, themes: &[Theme], page: &str) -> Html<String> {
    let body = format!(
        "<h1>Edit {name}</h1>\n{form}",
        name = escape(&set.name),
        form = set_form("/lego/editSet", &SetForm::from_set(set), themes, true),
    );
    Html(render("Edit Set", page, &body))
}

pub fn not_found(message: &str, page: &str) -> Html<String> {
    let body = format!(
        r#"
        <h1>404</h1>
        <p>{message}</p>
        <p><small>{page}</small></p>
        <p><a href="/">Return home</a></p>
        "#,
        message = escape(message),
        page = escape(page),
    );
    Html(render("Not Found", page, &body))
}

pub fn server_error(message: &str, page: &str) -> Html<String> {
    let body = format!(
        r#"
        <h1>500</h1>
        <p>{message}</p>
        <p><a href="/">Return home</a></p>
        "#,
        message = escape(message),
    );
    Html(render("Error", page, &body))
}
