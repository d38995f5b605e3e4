//! HTML pages. Kept as plain string rendering; all user text goes through
//! `escape`.

use models::{Post, PostFields};

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// List view for `/`.
pub fn index(posts: &[Post]) -> String {
    let mut body = String::from("<h1>Welcome to my blog!</h1>\n<p><a href=\"/add\">Add a new post</a></p>\n");
    if posts.is_empty() {
        body.push_str("<p>No posts yet.</p>\n");
    }
    for post in posts {
        body.push_str(&format!(
            concat!(
                "<div class=\"post\">\n",
                "<h2>{title}</h2>\n",
                "<p><em>Written by {author}</em></p>\n",
                "<p>{content}</p>\n",
                "<a href=\"/update/{id}\">Update</a>\n",
                "<form action=\"/delete/{id}\" method=\"post\" style=\"display:inline\">",
                "<button type=\"submit\">Delete</button></form>\n",
                "</div>\n"
            ),
            id = post.id,
            title = escape(&post.title),
            author = escape(&post.author),
            content = escape(&post.content),
        ));
    }
    layout("My Blog", &body)
}

/// Creation form for `/add`.
pub fn add_form() -> String {
    post_form("Add a new post", "/add", &PostFields::default(), "Add Post")
}

/// Edit form for `/update/{id}`, pre-filled with the post's fields.
pub fn update_form(post: &Post) -> String {
    post_form("Update post", &format!("/update/{}", post.id), &post.fields(), "Update Post")
}

fn post_form(heading: &str, action: &str, fields: &PostFields, submit: &str) -> String {
    let body = format!(
        concat!(
            "<h1>{heading}</h1>\n",
            "<form action=\"{action}\" method=\"post\">\n",
            "<label>Author <input type=\"text\" name=\"author\" value=\"{author}\"></label><br>\n",
            "<label>Title <input type=\"text\" name=\"post_title\" value=\"{title}\"></label><br>\n",
            "<label>Content <textarea name=\"post_content\">{content}</textarea></label><br>\n",
            "<button type=\"submit\">{submit}</button>\n",
            "</form>\n",
            "<p><a href=\"/\">Back</a></p>"
        ),
        heading = escape(heading),
        action = escape(action),
        author = escape(&fields.author),
        title = escape(&fields.title),
        content = escape(&fields.content),
        submit = escape(submit),
    );
    layout(heading, &body)
}
