use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// ISO-8601 local date-time string, e.g. "2025-03-10T14:30".
    pub date: String,
}
