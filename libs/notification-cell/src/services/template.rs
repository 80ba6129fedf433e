use shared_models::notification::BookingConfirmation;

use crate::models::RenderedEmail;

pub const CLINIC_ADDRESS: &str = "Dhaka, Bangladesh";

pub fn render_booking_confirmation(booking: &BookingConfirmation) -> RenderedEmail {
    let summary = format!(
        "Your Appointment for {} is on {} at {} is confirmed",
        booking.treatment, booking.date, booking.slot
    );

    let html = format!(
        r#"<div>
  <p>Hello, {name}</p>
  <h3>Your appointment for {treatment} is confirmed</h3>
  <p>Looking forward to seeing you on {date} at {slot}</p>
  <h3>Our Address</h3>
  <p>{address}</p>
</div>"#,
        name = escape_html(&booking.patient_name),
        treatment = escape_html(&booking.treatment),
        date = escape_html(&booking.date),
        slot = escape_html(&booking.slot),
        address = CLINIC_ADDRESS,
    );

    RenderedEmail {
        subject: summary.clone(),
        text: summary,
        html,
    }
}

// Booking fields come straight from the client.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
