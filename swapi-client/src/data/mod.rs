mod film;
mod page;
mod person;

pub use film::Film;
pub use page::Page;
pub use person::Person;
