use chrono::{DateTime, Utc};
use colored::Colorize;
use stockroom::api::{CmdMessage, MessageLevel};
use stockroom::model::{Product, Role, User};
use stockroom::session::Session;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn render_products(products: &[Product]) -> String {
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.product_id.clone(),
                p.name.clone(),
                p.category.clone(),
                format!("{:.2}", p.price),
                p.stock_quantity.to_string(),
            ]
        })
        .collect();
    render_table(&["ID", "Name", "Category", "Price", "Stock"], &rows)
}

/// Passwords are never shown.
pub(super) fn render_users(users: &[User]) -> String {
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| vec![u.user_id.clone(), u.username.clone(), u.role.clone()])
        .collect();
    render_table(&["ID", "Username", "Role"], &rows)
}

pub(super) fn render_roles(roles: &[Role]) -> String {
    let rows: Vec<Vec<String>> = roles
        .iter()
        .map(|r| {
            vec![
                r.role_id.clone(),
                r.name.clone(),
                r.permission_level.clone(),
            ]
        })
        .collect();
    render_table(&["ID", "Name", "Permission"], &rows)
}

pub(super) fn render_session(session: &Session) -> String {
    format!(
        "{} ({}) logged in {}\n",
        session.username.bold(),
        session.role,
        format_time_ago(session.logged_in_at).dimmed()
    )
}

pub(super) fn render_text_list(lines: &[String], empty_message: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty_message);
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad_to_width(h, *w))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);

    let mut out = String::new();
    out.push_str(&format!("{}\n", header_line.trim_end().bold()));
    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_to_width(cell, *w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_columns_line_up() {
        let products = vec![
            Product {
                product_id: "P1".into(),
                name: "Widget".into(),
                category: "Tools".into(),
                price: 9.99,
                stock_quantity: 5,
            },
            Product {
                product_id: "P10".into(),
                name: "Café crème".into(),
                category: "Food".into(),
                price: 3.0,
                stock_quantity: 120,
            },
        ];
        let out = render_products(&products);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("P1   Widget      Tools     9.99"));
        assert!(lines[2].starts_with("P10  Café crème  Food      3.00"));
    }

    #[test]
    fn users_table_hides_passwords() {
        let users = vec![User {
            user_id: "U1".into(),
            username: "ann".into(),
            password: "hunter2".into(),
            role: "admin".into(),
        }];
        let out = render_users(&users);
        assert!(out.contains("ann"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert_eq!(render_roles(&[]), "");
    }

    #[test]
    fn text_list_falls_back_to_empty_message() {
        assert_eq!(render_text_list(&[], "Nothing here."), "Nothing here.\n");
        assert_eq!(
            render_text_list(&["a = 1".to_string()], "Nothing here."),
            "a = 1\n"
        );
    }
}
