//! Server-rendered pages for lpg-ui
//!
//! Pure functions from data to HTML; handlers decide status codes.
//! All model and user text is escaped.

use lpg_common::db::{PlanRecord, PlanSummary, ProgressEntry};
use lpg_common::html::{escape, page, safe_href};
use lpg_common::plan::{
    ExpertiseLevel, LearningPlan, LearningStyle, PlanRequest, Timeline, Week, MAX_WEEKLY_HOURS,
    MIN_WEEKLY_HOURS,
};

pub const APP_TITLE: &str = "AI Learning Plan Generator";
pub const NO_PLAN_SELECTED: &str =
    "No learning plan selected. Please create a new plan or select an existing one from the sidebar.";
pub const GENERATION_FAILED: &str = "Plan generation failed or returned empty. Please try again.";

/// Login or sign-up form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    SignUp,
}

/// One-shot confirmation shown after a redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flash {
    pub saved: bool,
    pub rated: bool,
    pub reported: bool,
}

fn icon(name: &str) -> String {
    format!("<i class='material-icons icon'>{}</i>", name)
}

fn notice_html(error: Option<&str>, notice: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(msg) = error {
        out.push_str(&format!("<p class=\"error\">{}</p>\n", escape(msg)));
    }
    if let Some(msg) = notice {
        out.push_str(&format!("<p class=\"success\">{}</p>\n", escape(msg)));
    }
    out
}

pub fn auth_page(mode: AuthMode, error: Option<&str>, notice: Option<&str>) -> String {
    let (action, button, switch) = match mode {
        AuthMode::Login => (
            "/login",
            "Login",
            "<p class=\"small-muted\">No account yet? <a href=\"/signup\">Sign up</a></p>",
        ),
        AuthMode::SignUp => (
            "/signup",
            "Create Account",
            "<p class=\"small-muted\">Already registered? <a href=\"/login\">Log in</a></p>",
        ),
    };

    let body = format!(
        r#"<div class="main">
<h1>{icon} {title}</h1>
<p class="small-muted">Sign up or log in to create and view your personalized learning plans.</p>
{notices}<form method="post" action="{action}">
<label for="email">Email</label>
<input type="email" id="email" name="email" required>
<label for="password">Password</label>
<input type="password" id="password" name="password" required>
<button type="submit">{button}</button>
</form>
{switch}
</div>"#,
        icon = icon("school"),
        title = APP_TITLE,
        notices = notice_html(error, notice),
        action = action,
        button = button,
        switch = switch,
    );
    page(APP_TITLE, &body)
}

/// Sidebar plus main area for a signed-in user
pub fn workspace(email: &str, plans: &[PlanSummary], main: &str) -> String {
    let mut sidebar = String::new();
    sidebar.push_str(&format!("<h2>{} Your Learning Plans</h2>\n", icon("folder")));
    sidebar.push_str("<a class=\"button\" href=\"/plans/new\">Create New Learning Plan</a>\n");
    sidebar.push_str("<div class=\"sidebar-divider\"></div>\n<h3>Saved Learning Plans</h3>\n");
    for plan in plans {
        sidebar.push_str(&format!(
            "<a class=\"button\" href=\"/plans/{}\">{}</a>\n",
            escape(&plan.guid),
            escape(&plan.title)
        ));
    }
    sidebar.push_str("<div class=\"sidebar-divider\"></div>\n");
    sidebar.push_str(&format!(
        "<p class=\"small-muted\">Signed in as {}</p>\n<form method=\"post\" action=\"/logout\"><button type=\"submit\">Logout</button></form>\n",
        escape(email)
    ));

    let body = format!(
        "<div class=\"layout\">\n<nav class=\"sidebar\">\n{}</nav>\n<div class=\"main\">\n<h1>{} {}</h1>\n{}\n</div>\n</div>",
        sidebar,
        icon("dashboard"),
        APP_TITLE,
        main
    );
    page(APP_TITLE, &body)
}

pub fn no_plan_selected() -> String {
    format!("<p>{}</p>", NO_PLAN_SELECTED)
}

fn selected(cond: bool) -> &'static str {
    if cond {
        " selected"
    } else {
        ""
    }
}

/// Form field name for a learning style checkbox
pub fn style_field(style: LearningStyle) -> &'static str {
    match style {
        LearningStyle::Videos => "style_videos",
        LearningStyle::Articles => "style_articles",
        LearningStyle::HandsOnProjects => "style_projects",
        LearningStyle::Podcasts => "style_podcasts",
        LearningStyle::Books => "style_books",
    }
}

/// The ten-question plan form, pre-filled from `req`
pub fn plan_form(req: &PlanRequest, error: Option<&str>) -> String {
    let levels: String = ExpertiseLevel::ALL
        .iter()
        .map(|l| {
            format!(
                "<option value=\"{0}\"{1}>{0}</option>",
                l.label(),
                selected(*l == req.background_level)
            )
        })
        .collect();

    let styles: String = LearningStyle::ALL
        .iter()
        .map(|s| {
            let checked = if req.learning_style.contains(s) { " checked" } else { "" };
            format!(
                "<div><input type=\"checkbox\" id=\"{0}\" name=\"{0}\" value=\"on\"{1}> <span>{2}</span></div>",
                style_field(*s),
                checked,
                s.label()
            )
        })
        .collect();

    let timelines: String = Timeline::ALL
        .iter()
        .map(|t| {
            format!(
                "<option value=\"{0}\"{1}>{0}</option>",
                t.label(),
                selected(*t == req.timeline)
            )
        })
        .collect();

    format!(
        r#"<h2>{icon} Create a New Learning Plan</h2>
<p class="small-muted">Please answer the following questions to help us tailor your learning plan.</p>
{notices}<form method="post" action="/plans">
<label for="goal">1. What do you want to learn?</label>
<input type="text" id="goal" name="goal" placeholder="e.g., Web Development" value="{goal}">
<label for="topics">2. What specific topics are you interested in?</label>
<input type="text" id="topics" name="topics" placeholder="e.g., Front-end frameworks, APIs" value="{topics}">
<label for="primary_objective">3. What is your primary objective?</label>
<input type="text" id="primary_objective" name="primary_objective" placeholder="e.g., Career advancement, Personal interest" value="{objective}">
<label for="background_level">4. What is your current expertise level?</label>
<select id="background_level" name="background_level">{levels}</select>
<label>5. What are your preferred learning methods?</label>
{styles}
<label for="weekly_time">6. How many hours can you dedicate per week?</label>
<input type="number" id="weekly_time" name="weekly_time" min="{min}" max="{max}" value="{hours}">
<label for="timeline">7. What is your timeline?</label>
<select id="timeline" name="timeline">{timelines}</select>
<label for="future_goals">8. What are your career or personal goals after learning this?</label>
<input type="text" id="future_goals" name="future_goals" placeholder="e.g., Get a job as a developer" value="{future}">
<label for="challenges">9. What challenges or obstacles do you face?</label>
<textarea id="challenges" name="challenges" placeholder="e.g., Limited time, difficult concepts">{challenges}</textarea>
<label for="additional_info">10. Any additional information you'd like to share?</label>
<textarea id="additional_info" name="additional_info" placeholder="e.g., Specific interests, learning preferences">{additional}</textarea>
<button type="submit">Generate Learning Plan</button>
</form>"#,
        icon = icon("create"),
        notices = notice_html(error, None),
        goal = escape(&req.goal),
        topics = escape(&req.topics),
        objective = escape(&req.primary_objective),
        levels = levels,
        styles = styles,
        min = MIN_WEEKLY_HOURS,
        max = MAX_WEEKLY_HOURS,
        hours = req.weekly_time,
        timelines = timelines,
        future = escape(&req.future_goals),
        challenges = escape(&req.challenges),
        additional = escape(&req.additional_info),
    )
}

fn or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => escape(v),
        _ => "N/A".to_string(),
    }
}

fn is_completed(progress: &[ProgressEntry], week_index: usize, item_index: usize) -> bool {
    progress.iter().any(|p| {
        p.completed && p.week_index == week_index as i64 && p.item_index == item_index as i64
    })
}

fn week_html(plan_id: &str, week_index: usize, week: &Week, progress: &[ProgressEntry]) -> String {
    let number = week
        .week_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string());
    let objective = if week.objective.trim().is_empty() {
        "No Objective".to_string()
    } else {
        escape(&week.objective)
    };

    let mut out = format!(
        "<div class=\"plan-container\">\n<h3>{} Week {}: {}</h3>\n<h4>{} Resources</h4>\n<ul>\n",
        icon("date_range"),
        number,
        objective,
        icon("link")
    );
    for resource in &week.resources {
        let name = if resource.name.trim().is_empty() {
            "Unknown Resource"
        } else {
            resource.name.as_str()
        };
        let kind = if resource.kind.trim().is_empty() {
            "Unknown"
        } else {
            resource.kind.as_str()
        };
        out.push_str(&format!(
            "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a> ({})</li>\n",
            safe_href(&resource.link),
            escape(name),
            escape(kind)
        ));
    }
    out.push_str("</ul>\n");

    if let Some(video) = &week.best_video {
        let channel = if video.channel.is_empty() {
            String::new()
        } else {
            format!(" by {}", escape(&video.channel))
        };
        out.push_str(&format!(
            "<h4>{} Best Video</h4>\n<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>{} ({} views)</p>\n",
            icon("smart_display"),
            safe_href(&video.link),
            escape(&video.title),
            channel,
            video.view_count
        ));
    }

    out.push_str(&format!("<h4>{} Action Items</h4>\n", icon("assignment")));
    for (item_index, action) in week.action_items.iter().enumerate() {
        let checked = if is_completed(progress, week_index, item_index) {
            " checked"
        } else {
            ""
        };
        out.push_str(&format!(
            r#"<form method="post" action="/plans/{plan}/progress">
<input type="hidden" name="week_index" value="{week_index}">
<input type="hidden" name="item_index" value="{item_index}">
<label><input type="checkbox" name="completed" value="true"{checked} onchange="this.form.submit()"> <strong>{desc}</strong> (Due by {due})</label>
<noscript><button type="submit">Save</button></noscript>
</form>
"#,
            plan = escape(plan_id),
            week_index = week_index,
            item_index = item_index,
            checked = checked,
            desc = escape(&action.description),
            due = or_na(action.due_by.as_deref()),
        ));
    }
    out.push_str("</div>\n");
    out
}

/// Main area for a saved plan
pub fn plan_view(record: &PlanRecord, plan: &LearningPlan, progress: &[ProgressEntry], flash: Flash) -> String {
    let mut out = String::new();
    if flash.saved {
        out.push_str("<p class=\"success\">Learning plan generated and saved!</p>\n");
    }
    if flash.rated {
        out.push_str("<p class=\"success\">Thanks for rating this plan!</p>\n");
    }
    if flash.reported {
        out.push_str("<p class=\"success\">Thank you for reporting the issue!</p>\n");
    }

    let goal = plan.goal.as_deref().filter(|g| !g.trim().is_empty()).unwrap_or("No Title");
    let styles = plan
        .learning_style
        .as_ref()
        .map(|s| s.join(", "))
        .unwrap_or_default();
    let weekly_time = plan
        .weekly_time
        .as_ref()
        .map(|w| w.to_string())
        .unwrap_or_default();

    out.push_str(&format!("<h2>Learning Plan: {}</h2>\n", escape(goal)));
    out.push_str(&format!(
        "<p class=\"small-muted\"><strong>Duration:</strong> {}</p>\n",
        or_na(plan.timeline.as_deref())
    ));
    out.push_str(&format!(
        "<p class=\"small-muted\"><strong>Learning Styles:</strong> {}</p>\n",
        escape(&styles)
    ));
    out.push_str(&format!(
        "<p class=\"small-muted\"><strong>Background Level:</strong> {}</p>\n",
        or_na(plan.background_level.as_deref())
    ));
    out.push_str(&format!(
        "<p class=\"small-muted\"><strong>Weekly Time Available:</strong> {}</p>\n",
        or_na(Some(&weekly_time))
    ));

    for (index, week) in plan.weeks.iter().enumerate() {
        out.push_str(&week_html(&record.guid, index, week, progress));
    }

    let current = record
        .rating
        .map(|r| format!("Current rating: {} / 5", r))
        .unwrap_or_else(|| "Not rated yet".to_string());
    let options: String = (1..=5)
        .map(|r| {
            format!(
                "<option value=\"{0}\"{1}>{0}</option>",
                r,
                selected(record.rating == Some(r))
            )
        })
        .collect();
    out.push_str(&format!(
        r#"<h3>{icon} Rate this plan</h3>
<p class="small-muted">{current}</p>
<form method="post" action="/plans/{plan}/rating">
<select name="rating">{options}</select>
<button type="submit">Save Rating</button>
</form>
<details>
<summary>Report an Issue</summary>
<form method="post" action="/reports">
<input type="hidden" name="plan_id" value="{plan}">
<label for="description">Describe the issue:</label>
<textarea id="description" name="description"></textarea>
<button type="submit">Submit Report</button>
</form>
</details>"#,
        icon = icon("star"),
        current = current,
        plan = escape(&record.guid),
        options = options,
    ));
    out
}
