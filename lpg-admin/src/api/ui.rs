//! Admin dashboard pages

use lpg_common::db::{DashboardStats, PlanOverview, Report, SignupCount, UserOverview};
use lpg_common::html::{escape, page};

pub const TITLE: &str = "LPG Admin";

/// Sidebar entries: (path, label)
const NAV: [(&str, &str); 4] = [
    ("/dashboard", "Dashboard"),
    ("/users", "Users"),
    ("/plans", "Learning Plans"),
    ("/reports", "Reported Issues"),
];

/// Widest bar in the signup chart, in pixels
const BAR_MAX_PX: i64 = 400;

fn layout(active: &str, main: &str) -> String {
    let mut nav = String::from("<h2>Admin Navigation</h2>\n");
    for (path, label) in NAV {
        let marker = if path == active { " &#9656;" } else { "" };
        nav.push_str(&format!("<a class=\"button\" href=\"{}\">{}{}</a>\n", path, label, marker));
    }
    nav.push_str(
        "<div class=\"sidebar-divider\"></div>\n<form method=\"post\" action=\"/logout\"><button type=\"submit\">Logout</button></form>\n",
    );

    let body = format!(
        "<div class=\"layout\">\n<nav class=\"sidebar\">\n{}</nav>\n<div class=\"main\">\n{}\n</div>\n</div>",
        nav, main
    );
    page(TITLE, &body)
}

pub fn login_page(error: Option<&str>) -> String {
    let error = error
        .map(|msg| format!("<p class=\"error\">{}</p>\n", escape(msg)))
        .unwrap_or_default();
    let body = format!(
        r#"<div class="main">
<h1>Admin Login</h1>
{error}<form method="post" action="/login">
<label for="email">Email</label>
<input type="email" id="email" name="email" required>
<label for="password">Password</label>
<input type="password" id="password" name="password" required>
<button type="submit">Login</button>
</form>
</div>"#
    );
    page(TITLE, &body)
}

fn search_form(action: &str, label: &str, term: &str) -> String {
    format!(
        "<form method=\"get\" action=\"{}\">\n<label for=\"search\">{}</label>\n<input type=\"text\" id=\"search\" name=\"search\" value=\"{}\">\n<button type=\"submit\">Search</button>\n</form>\n",
        action,
        label,
        escape(term)
    )
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut out = String::from("<table>\n<tr>");
    for h in headers {
        out.push_str(&format!("<th>{}</th>", h));
    }
    out.push_str("</tr>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape(&cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

/// Horizontal bar per signup date, scaled to the busiest day
fn signup_chart(signups: &[SignupCount]) -> String {
    if signups.is_empty() {
        return "<p class=\"small-muted\">No signups yet.</p>\n".to_string();
    }
    let max = signups.iter().map(|s| s.count).max().unwrap_or(1).max(1);

    let mut out = String::from(
        "<h3>User Signups</h3>\n<table>\n<tr><th>Signup Date</th><th>Number of Users</th></tr>\n",
    );
    for s in signups {
        let width = s.count * BAR_MAX_PX / max;
        out.push_str(&format!(
            "<tr><td>{}</td><td><div class=\"bar\" style=\"width: {}px\"></div> {}</td></tr>\n",
            escape(&s.date),
            width.max(1),
            s.count
        ));
    }
    out.push_str("</table>\n");
    out
}

pub fn dashboard(stats: &DashboardStats) -> String {
    let main = format!(
        r#"<h1>Admin Dashboard</h1>
<table>
<tr><th>Total Users</th><th>Total Learning Plans</th><th>Average Rating</th></tr>
<tr><td>{}</td><td>{}</td><td>{}</td></tr>
</table>
{}"#,
        stats.total_users,
        stats.total_plans,
        stats.average_rating_display(),
        signup_chart(&stats.signups)
    );
    layout("/dashboard", &main)
}

pub fn users(rows: &[UserOverview], term: &str) -> String {
    let cells = rows
        .iter()
        .map(|u| {
            vec![
                u.email.clone(),
                u.phone.clone().unwrap_or_default(),
                u.plan_count.to_string(),
            ]
        })
        .collect();
    let main = format!(
        "<h1>User Details</h1>\n{}{}",
        search_form("/users", "Search by Email", term),
        table(&["Email", "Phone", "Learning Plans"], cells)
    );
    layout("/users", &main)
}

pub fn plans(rows: &[PlanOverview], term: &str) -> String {
    let cells = rows
        .iter()
        .map(|p| {
            vec![
                p.user_email.clone(),
                p.title.clone(),
                p.rating.map(|r| r.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    let main = format!(
        "<h1>Learning Plans Overview</h1>\n{}{}",
        search_form("/plans", "Search Learning Plans by Title", term),
        table(&["User Email", "Plan Title", "Rating"], cells)
    );
    layout("/plans", &main)
}

pub fn reports(rows: &[Report]) -> String {
    let cells = rows
        .iter()
        .map(|r| vec![r.email.clone(), r.description.clone(), r.timestamp.clone()])
        .collect();
    let main = format!(
        "<h1>Reported Issues</h1>\n{}",
        table(&["User Email", "Description", "Timestamp"], cells)
    );
    layout("/reports", &main)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_chart_scales_to_busiest_day() {
        let html = signup_chart(&[
            SignupCount {
                date: "2024-03-01".to_string(),
                count: 2,
            },
            SignupCount {
                date: "2024-03-02".to_string(),
                count: 4,
            },
        ]);
        assert!(html.contains("width: 200px"));
        assert!(html.contains("width: 400px"));
        assert!(signup_chart(&[]).contains("No signups yet."));
    }

    #[test]
    fn test_dashboard_without_ratings() {
        let stats = DashboardStats {
            total_users: 3,
            total_plans: 0,
            average_rating: None,
            signups: Vec::new(),
        };
        let html = dashboard(&stats);
        assert!(html.contains("<td>3</td><td>0</td><td>N/A</td>"));
    }

    #[test]
    fn test_table_escapes_cells() {
        let html = reports(&[Report {
            guid: "r1".to_string(),
            email: "a@b.com".to_string(),
            description: "<img src=x>".to_string(),
            timestamp: "2024-03-01T10:00:00.000Z".to_string(),
        }]);
        assert!(html.contains("&lt;img src=x&gt;"));
        assert!(html.contains("<th>Description</th>"));
    }
}
