pub mod bookings;
pub mod house_images;
pub mod houses;
pub mod owners;

pub use bookings::Entity as Bookings;
pub use house_images::Entity as HouseImages;
pub use houses::Entity as Houses;
pub use owners::Entity as Owners;
