pub mod artist;
pub mod show;
pub mod venue;

pub use artist::{Artist, ArtistFields};
pub use show::{NewShow, Show, ShowListing, ShowTiming};
pub use venue::{Venue, VenueFields};
