//! Domain types and models

pub mod foaas;
pub mod unsplash;
pub mod version;

pub use foaas::{Foaas, FoaasField, FoaasOperation};
pub use unsplash::{
    ImageSize, LinksBundle, ProfileImageLinks, SocialLinks, UnsplashImage, UrlBundle, User,
    UserLinks,
};
pub use version::Version;
