//! Server-rendered pages. Every dynamic value goes through [`escape`].

use std::fmt::Write;

use crate::timetable::TimetableEntry;

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; background: #f5f6f8; color: #1f2933; margin: 0; }
    .container { max-width: 860px; margin: 48px auto; background: #fff; border: 1px solid #d9dee5;
                 border-radius: 10px; padding: 32px; }
    h1 { margin-top: 0; }
    .error { background: #fdecec; border: 1px solid #f5b5b5; color: #9b1c1c; padding: 10px 14px;
             border-radius: 6px; margin-bottom: 16px; }
    label { display: block; margin: 12px 0 4px; }
    input { padding: 8px; border: 1px solid #c4cbd4; border-radius: 6px; width: 100%; box-sizing: border-box; }
    button { margin-top: 16px; padding: 8px 16px; border: 0; border-radius: 6px; background: #1d4ed8;
             color: #fff; cursor: pointer; }
    button.danger { background: #b91c1c; }
    table { width: 100%; border-collapse: collapse; margin: 16px 0; }
    th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e5e8ec; }
    td input { width: 100%; }
    .topbar { display: flex; justify-content: space-between; align-items: center; }
    .empty { color: #6b7280; }
"#;

const DASHBOARD_SCRIPT: &str = r#"
async function send(payload) {
  const res = await fetch('/api/timetable', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    credentials: 'same-origin',
    body: JSON.stringify(payload),
  });
  const body = await res.json().catch(() => ({}));
  if (res.status === 401) { window.location = '/'; return; }
  if (!res.ok || body.error) { alert(body.error || 'Request failed'); return; }
  window.location.reload();
}

function rowFields(row) {
  const out = {};
  row.querySelectorAll('input[data-field]').forEach((el) => { out[el.dataset.field] = el.value; });
  return out;
}

document.getElementById('add-form').addEventListener('submit', (ev) => {
  ev.preventDefault();
  const data = Object.fromEntries(new FormData(ev.target).entries());
  send(Object.assign({ action: 'add' }, data));
});

document.querySelectorAll('tr[data-id]').forEach((row) => {
  const id = Number(row.dataset.id);
  row.querySelector('.save').addEventListener('click', () => {
    send(Object.assign({ action: 'update', id }, rowFields(row)));
  });
  row.querySelector('.delete').addEventListener('click', () => {
    if (confirm('Delete this class?')) { send({ action: 'delete', id }); }
  });
});
"#;

/// Minimal HTML escaping for text and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
<div class="container">
{body}
</div>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Landing page with the login form and an optional error banner.
pub fn index_page(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Teacher Timetable</h1>\n");
    if let Some(msg) = error.filter(|m| !m.is_empty()) {
        let _ = writeln!(body, r#"<div class="error">{}</div>"#, escape(msg));
    }
    body.push_str(
        r#"<form method="post" action="/login">
    <label for="email">Email</label>
    <input id="email" name="email" type="email" autocomplete="username" required>
    <label for="password">Password</label>
    <input id="password" name="password" type="password" autocomplete="current-password" required>
    <button type="submit">Log in</button>
</form>
"#,
    );
    layout("Login", &body)
}

/// Dashboard listing the teacher's entries with inline edit/delete controls.
pub fn dashboard_page(user_name: &str, entries: &[TimetableEntry]) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        r#"<div class="topbar"><h1>Welcome, {}</h1><a href="/logout">Log out</a></div>"#,
        escape(user_name)
    );

    body.push_str("<h2>My timetable</h2>\n");
    if entries.is_empty() {
        body.push_str(r#"<p class="empty">No classes scheduled yet.</p>"#);
        body.push('\n');
    } else {
        body.push_str(
            "<table>\n<tr><th>Day</th><th>Start</th><th>End</th><th>Subject</th><th>Room</th><th></th></tr>\n",
        );
        for e in entries {
            let _ = write!(body, r#"<tr data-id="{}">"#, e.id);
            for (field, value) in [
                ("day", &e.day),
                ("start_time", &e.start_time),
                ("end_time", &e.end_time),
                ("subject", &e.subject),
                ("room", &e.room),
            ] {
                let _ = write!(
                    body,
                    r#"<td><input data-field="{field}" value="{}"></td>"#,
                    escape(value)
                );
            }
            body.push_str(
                r#"<td><button class="save" type="button">Save</button> <button class="delete danger" type="button">Delete</button></td></tr>"#,
            );
            body.push('\n');
        }
        body.push_str("</table>\n");
    }

    body.push_str(
        r#"<h2>Add a class</h2>
<form id="add-form">
    <label>Day <input name="day" placeholder="Monday" required></label>
    <label>Start time <input name="start_time" placeholder="09:00" required></label>
    <label>End time <input name="end_time" placeholder="10:00" required></label>
    <label>Subject <input name="subject" required></label>
    <label>Room <input name="room" required></label>
    <button type="submit">Add</button>
</form>
"#,
    );
    let _ = write!(body, "<script>{DASHBOARD_SCRIPT}</script>");
    layout("Dashboard", &body)
}
