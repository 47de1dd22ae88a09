//! Server-rendered HTML pages.
//!
//! Pages are small `format!` templates around a shared layout. Every value
//! that originates from a user or the database passes through [`escape`].

use std::fmt::Write as _;

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;

use crate::domain::{FeedReport, User};

use super::session::SessionUser;

/// Escape text for inclusion in HTML element content or quoted attributes.
///
/// # Examples
/// ```
/// use feedeyes::inbound::http::views::escape;
///
/// assert_eq!(escape("<b>\"Q1\" & 'Q2'</b>"), "&lt;b&gt;&quot;Q1&quot; &amp; &#x27;Q2&#x27;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wrap rendered markup in a `200 OK` HTML response.
pub fn page(markup: String) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(markup)
}

fn layout(title: &str, user: Option<&SessionUser>, body: &str) -> String {
    let nav = match user {
        Some(user) => {
            let admin = if user.role.is_admin() {
                r#" <a href="/admin-dashboard">Admin</a>"#
            } else {
                ""
            };
            format!(
                concat!(
                    r#"<nav><a href="/dashboard">Dashboard</a> <a href="/reports">Reports</a> "#,
                    r#"<a href="/report/new">New report</a> <a href="/feedeyes">Feedeyes</a> "#,
                    r#"<a href="/profile">{username}</a>{admin} <a href="/logout">Log out</a></nav>"#
                ),
                username = escape(&user.username),
                admin = admin,
            )
        }
        None => r#"<nav><a href="/signup">Sign up</a> <a href="/login">Log in</a></nav>"#.to_owned(),
    };
    format!(
        concat!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">",
            "<title>{title} | Feedeyes</title></head>\n<body>\n{nav}\n<main>\n<h1>{title}</h1>\n",
            "{body}\n</main>\n</body>\n</html>\n"
        ),
        title = escape(title),
        nav = nav,
        body = body,
    )
}

const SIGNUP_FORM: &str = concat!(
    r#"<form method="post" action="/signup">"#,
    r#"<label>Username <input name="username" required></label>"#,
    r#"<label>Email <input name="email" type="email" required></label>"#,
    r#"<label>Password <input name="password" type="password" required></label>"#,
    r#"<label>Confirm password <input name="confirm_password" type="password" required></label>"#,
    r#"<button type="submit">Sign up</button></form>"#
);

const LOGIN_FORM: &str = concat!(
    r#"<form method="post" action="/login">"#,
    r#"<label>Username or email <input name="username" required></label>"#,
    r#"<label>Password <input name="password" type="password" required></label>"#,
    r#"<button type="submit">Log in</button></form>"#
);

pub fn landing(user: Option<&SessionUser>) -> String {
    let body = match user {
        Some(user) => format!(
            r#"<p>Signed in as {}. Go to your <a href="/dashboard">dashboard</a>.</p>"#,
            escape(&user.username)
        ),
        None => format!(
            "<section><h2>Create an account</h2>{SIGNUP_FORM}</section>\n\
             <section><h2>Log in</h2>{LOGIN_FORM}</section>"
        ),
    };
    layout("Welcome", user, &body)
}

pub fn signup() -> String {
    layout("Sign up", None, SIGNUP_FORM)
}

pub fn login() -> String {
    layout("Log in", None, LOGIN_FORM)
}

fn optional(value: Option<&str>) -> String {
    value.map(escape).unwrap_or_default()
}

fn report_table(reports: &[FeedReport], show_owner: bool) -> String {
    if reports.is_empty() {
        return "<p>No reports yet.</p>".to_owned();
    }
    let mut table = String::from("<table>\n<tr><th>Date</th><th>Feed</th><th>Code</th><th>Amount</th>");
    if show_owner {
        table.push_str("<th>Owner</th>");
    }
    table.push_str("</tr>\n");
    for report in reports {
        let _ = write!(
            table,
            r#"<tr><td>{date}</td><td><a href="/report/{id}">{name}</a></td><td>{code}</td><td>{amount}</td>"#,
            date = report.report_date(),
            id = report.id(),
            name = optional(report.feed_name()),
            code = optional(report.feed_code()),
            amount = report.amount(),
        );
        if show_owner {
            let _ = write!(table, "<td>{}</td>", report.owner());
        }
        table.push_str("</tr>\n");
    }
    table.push_str("</table>");
    table
}

pub fn dashboard(user: &SessionUser, reports: &[FeedReport]) -> String {
    let body = format!(
        "<p>Welcome back, {name}. Role: {role}.</p>\n<h2>Recent reports</h2>\n{table}",
        name = escape(&user.username),
        role = user.role,
        table = report_table(reports, false),
    );
    layout("Dashboard", Some(user), &body)
}

pub fn admin_dashboard(user: &SessionUser, users: &[User]) -> String {
    let mut rows = String::new();
    for account in users {
        let _ = writeln!(
            rows,
            "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{role}</td><td>{created}</td></tr>",
            id = account.id(),
            name = escape(account.username().as_ref()),
            email = escape(account.email().as_ref()),
            role = account.role(),
            created = account.created_at().format("%Y-%m-%d %H:%M"),
        );
    }
    let body = format!(
        "<table>\n<tr><th>Id</th><th>Username</th><th>Email</th><th>Role</th><th>Joined</th></tr>\n{rows}</table>"
    );
    layout("Admin dashboard", Some(user), &body)
}

pub fn feedeyes(user: &SessionUser) -> String {
    layout(
        "Feedeyes",
        Some(user),
        concat!(
            "<p>Plan feed formulations, record what each batch cost and keep ",
            "a history of reports per flock.</p>\n",
            r#"<p><a href="/report/new">Record a new report</a></p>"#
        ),
    )
}

pub fn new_report(user: &SessionUser) -> String {
    layout(
        "New report",
        Some(user),
        concat!(
            r#"<form method="post" action="/report/new">"#,
            r#"<label>Feed name <input name="feed_name" maxlength="200"></label>"#,
            r#"<label>Feed code <input name="feed_code" maxlength="100"></label>"#,
            r#"<label>Amount <input name="amount" inputmode="decimal"></label>"#,
            r#"<button type="submit">Save</button></form>"#
        ),
    )
}

pub fn reports(user: &SessionUser, reports: &[FeedReport]) -> String {
    let heading = if user.role.is_admin() {
        "All reports"
    } else {
        "Your reports"
    };
    let body = format!(
        "<h2>{heading}</h2>\n{}",
        report_table(reports, user.role.is_admin())
    );
    layout("Reports", Some(user), &body)
}

pub fn report(user: &SessionUser, report: &FeedReport) -> String {
    let body = format!(
        concat!(
            "<dl>\n<dt>Feed</dt><dd>{name}</dd>\n<dt>Code</dt><dd>{code}</dd>\n",
            "<dt>Date</dt><dd>{date}</dd>\n<dt>Amount</dt><dd>{amount}</dd>\n",
            "<dt>Owner</dt><dd>{owner}</dd>\n<dt>Data</dt><dd><pre>{data}</pre></dd>\n</dl>"
        ),
        name = optional(report.feed_name()),
        code = optional(report.feed_code()),
        date = report.report_date(),
        amount = report.amount(),
        owner = report.owner(),
        data = escape(&report.data().to_string()),
    );
    layout("Report", Some(user), &body)
}

pub fn profile(user: &SessionUser, account: &User) -> String {
    let body = format!(
        concat!(
            "<dl>\n<dt>Username</dt><dd>{name}</dd>\n<dt>Email</dt><dd>{email}</dd>\n",
            "<dt>Role</dt><dd>{role}</dd>\n<dt>Member since</dt><dd>{since}</dd>\n</dl>"
        ),
        name = escape(account.username().as_ref()),
        email = escape(account.email().as_ref()),
        role = account.role(),
        since = account.created_at().format("%Y-%m-%d"),
    );
    layout("Profile", Some(user), &body)
}
