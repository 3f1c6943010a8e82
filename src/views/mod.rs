//! Server-side View Rendering
//!
//! Handlers hand a template name plus a JSON data mapping to a
//! [`ViewRenderer`]; the built-in [`HtmlRenderer`] covers the directory's
//! five views. The trait is the seam — swapping in a real template engine
//! only touches this module.

use serde_json::Value;

use crate::utils::AppError;

/// Rendering contract: a named template and a data mapping in, HTML out
pub trait ViewRenderer: Send + Sync {
    fn render(&self, template: &str, data: &Value) -> Result<String, AppError>;
}

/// Built-in renderer producing the directory's HTML
pub struct HtmlRenderer;

impl ViewRenderer for HtmlRenderer {
    fn render(&self, template: &str, data: &Value) -> Result<String, AppError> {
        match template {
            "index" => Ok(index(data)),
            "login" => Ok(login(data)),
            "edit" => Ok(edit(data)),
            "profile" => Ok(profile(data)),
            other => Err(AppError::internal(format!("Unknown template: {other}"))),
        }
    }
}

/// Escape text for HTML interpolation
fn esc(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn str_field<'a>(data: &'a Value, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or("")
}

fn page(title: &str, body: String) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} - Staff Directory</title>
</head>
<body>
{body}
</body>
</html>
"#,
    )
}

fn employee_row(emp: &Value) -> String {
    let id = str_field(emp, "id");
    format!(
        r#"    <tr>
      <td><img src="/uploads/{picture}" alt="" width="40"></td>
      <td><a href="/profile/{id}">{name}</a></td>
      <td>{email}</td>
      <td>{position}</td>
      <td>
        <a href="/edit/{id}">Edit</a>
        <form method="post" action="/delete/{id}"><button type="submit">Delete</button></form>
      </td>
    </tr>"#,
        picture = esc(str_field(emp, "profile_picture")),
        id = esc(id),
        name = esc(str_field(emp, "name")),
        email = esc(str_field(emp, "email")),
        position = esc(str_field(emp, "position")),
    )
}

fn index(data: &Value) -> String {
    let rows: String = data
        .get("employees")
        .and_then(Value::as_array)
        .map(|emps| emps.iter().map(employee_row).collect::<Vec<_>>().join("\n"))
        .unwrap_or_default();

    let body = format!(
        r#"  <h1>Employee Directory</h1>
  <p><a href="/logout">Log out</a></p>
  <table>
    <tr><th></th><th>Name</th><th>Email</th><th>Position</th><th></th></tr>
{rows}
  </table>
  <h2>Add employee</h2>
  <form method="post" action="/add" enctype="multipart/form-data">
    <input name="name" placeholder="Name">
    <input name="email" placeholder="Email">
    <input name="position" placeholder="Position">
    <input name="salary" placeholder="Salary">
    <input name="jobLocation" placeholder="Location">
    <input name="phoneNumber" placeholder="Phone">
    <input name="joiningDate" type="date">
    <input name="profilePicture" type="file">
    <button type="submit">Add</button>
  </form>"#,
    );
    page("Employees", body)
}

fn login(data: &Value) -> String {
    let error = str_field(data, "error");
    let error_html = if error.is_empty() {
        String::new()
    } else {
        format!("  <p class=\"error\">{}</p>\n", esc(error))
    };

    let body = format!(
        r#"  <h1>Admin Login</h1>
{error_html}  <form method="post" action="/login">
    <input name="email" type="email" placeholder="Email" required>
    <input name="password" type="password" placeholder="Password" required>
    <button type="submit">Log in</button>
  </form>"#,
    );
    page("Login", body)
}

fn edit(data: &Value) -> String {
    let emp = data.get("employee").cloned().unwrap_or(Value::Null);
    let id = str_field(&emp, "id").to_string();

    let body = format!(
        r#"  <h1>Edit employee</h1>
  <form method="post" action="/update/{id}" enctype="multipart/form-data">
    <input name="name" value="{name}" placeholder="Name">
    <input name="email" value="{email}" placeholder="Email">
    <input name="position" value="{position}" placeholder="Position">
    <input name="salary" value="{salary}" placeholder="Salary">
    <input name="jobLocation" value="{job_location}" placeholder="Location">
    <input name="phoneNumber" value="{phone_number}" placeholder="Phone">
    <input name="joiningDate" type="date" value="{joining_date}">
    <img src="/uploads/{picture}" alt="" width="80">
    <input name="profilePicture" type="file">
    <button type="submit">Save</button>
  </form>
  <p><a href="/">Back</a></p>"#,
        id = esc(&id),
        name = esc(str_field(&emp, "name")),
        email = esc(str_field(&emp, "email")),
        position = esc(str_field(&emp, "position")),
        salary = emp.get("salary").and_then(Value::as_f64).map(|s| s.to_string()).unwrap_or_default(),
        job_location = esc(str_field(&emp, "job_location")),
        phone_number = esc(str_field(&emp, "phone_number")),
        joining_date = esc(str_field(&emp, "joining_date")),
        picture = esc(str_field(&emp, "profile_picture")),
    );
    page("Edit", body)
}

fn profile(data: &Value) -> String {
    let emp = data.get("employee").cloned().unwrap_or(Value::Null);
    let salary = emp
        .get("salary")
        .and_then(Value::as_f64)
        .map(|s| s.to_string())
        .unwrap_or_default();

    let body = format!(
        r#"  <h1>{name}</h1>
  <img src="/uploads/{picture}" alt="" width="160">
  <ul>
    <li>Email: {email}</li>
    <li>Position: {position}</li>
    <li>Salary: {salary}</li>
    <li>Location: {job_location}</li>
    <li>Phone: {phone_number}</li>
    <li>Joined: {joining_date}</li>
  </ul>
  <p><a href="/edit/{id}">Edit</a> · <a href="/">Back</a></p>"#,
        name = esc(str_field(&emp, "name")),
        picture = esc(str_field(&emp, "profile_picture")),
        email = esc(str_field(&emp, "email")),
        position = esc(str_field(&emp, "position")),
        job_location = esc(str_field(&emp, "job_location")),
        phone_number = esc(str_field(&emp, "phone_number")),
        joining_date = esc(str_field(&emp, "joining_date")),
        id = esc(str_field(&emp, "id")),
    );
    page("Profile", body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_lists_employees() {
        let html = HtmlRenderer
            .render(
                "index",
                &json!({"employees": [
                    {"id": "employee:a1", "name": "Ann", "email": "a@x.com",
                     "position": "Eng", "profile_picture": "default.png"}
                ]}),
            )
            .unwrap();
        assert!(html.contains("Ann"));
        assert!(html.contains("/profile/employee:a1"));
        assert!(html.contains("/uploads/default.png"));
    }

    #[test]
    fn test_login_renders_error_message() {
        let html = HtmlRenderer
            .render("login", &json!({"error": "Invalid credentials"}))
            .unwrap();
        assert!(html.contains("Invalid credentials"));

        let html = HtmlRenderer.render("login", &json!({})).unwrap();
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_edit_prefills_fields() {
        let html = HtmlRenderer
            .render(
                "edit",
                &json!({"employee": {"id": "employee:a1", "name": "Ann", "salary": 4200.0}}),
            )
            .unwrap();
        assert!(html.contains(r#"value="Ann""#));
        assert!(html.contains("4200"));
        assert!(html.contains("/update/employee:a1"));
    }

    #[test]
    fn test_values_are_html_escaped() {
        let html = HtmlRenderer
            .render(
                "profile",
                &json!({"employee": {"name": "<script>alert(1)</script>"}}),
            )
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let err = HtmlRenderer.render("nope", &json!({})).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
