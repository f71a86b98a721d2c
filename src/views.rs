//! HTML pages served to the person completing a request.

use crate::models::PendingRequest;

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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

pub fn input_form(request_id: &str, pending: &PendingRequest, city: &str) -> String {
    let district = escape(pending.district.as_deref().unwrap_or_default());
    let building_type = escape(pending.building_type.as_deref().unwrap_or_default());
    let body = format!(
        "<h1>Property details</h1>\n\
         <form action=\"/predict\" method=\"post\">\n\
         <input type=\"hidden\" name=\"request_id\" value=\"{request_id}\">\n\
         <p>City: <input type=\"text\" value=\"{city}\" readonly></p>\n\
         <p>District: <input type=\"text\" value=\"{district}\" readonly></p>\n\
         <p>Building type: <input type=\"text\" value=\"{building_type}\" readonly></p>\n\
         <p><label>Bedrooms: <input type=\"number\" name=\"bedrooms\" min=\"0\" step=\"1\" required></label></p>\n\
         <p><label>Bathrooms: <input type=\"number\" name=\"bathrooms\" min=\"0\" step=\"1\" required></label></p>\n\
         <p><label>Area (sq ft): <input type=\"number\" name=\"area\" min=\"0\" step=\"any\" required></label></p>\n\
         <button type=\"submit\">Estimate price</button>\n\
         </form>",
        request_id = escape(request_id),
        city = escape(city),
    );
    page("Property details", &body)
}

pub fn result(price: f64) -> String {
    page(
        "Estimated price",
        &format!("<h1>Estimated price</h1>\n<p class=\"price\">{price:.2}</p>"),
    )
}
