use byt_domain::{FoaasField, FoaasOperation, LinksBundle, UnsplashImage, UrlBundle};
use url::Url;

pub const BASE_URL: &str = "https://foaas.test";

pub fn operation(name: &str, url: &str, fields: &[(&str, &str)]) -> FoaasOperation {
    FoaasOperation {
        name: name.to_string(),
        shortname: None,
        url: url.to_string(),
        fields: fields.iter().map(|(name, field)| FoaasField::new(*name, *field)).collect(),
    }
}

/// A small catalog, deliberately unsorted.
pub fn catalog() -> Vec<FoaasOperation> {
    vec![
        operation("Version", "/version", &[]),
        operation("Ballmer", "/ballmer/:name/:company/:from", &[
            ("Name", "name"),
            ("Company", "company"),
            ("From", "from"),
        ]),
        FoaasOperation {
            shortname: Some("bus".to_string()),
            ..operation("Busy", "/bus/:name/:from", &[("Name", "name"), ("From", "from")])
        },
    ]
}

pub fn image(id: &str) -> UnsplashImage {
    let url = |variant: &str| {
        Url::parse(&format!("https://images.test/{id}?variant={variant}")).unwrap()
    };
    UnsplashImage {
        id: id.to_string(),
        slug: format!("slug-{id}"),
        blur_hash: format!("hash-{id}"),
        width: 1080,
        height: 1920,
        description: None,
        alt_description: None,
        urls: UrlBundle {
            full: url("full"),
            regular: url("regular"),
            small: url("small"),
            thumb: url("thumb"),
        },
        links: LinksBundle {
            download_location: Url::parse(&format!("https://api.test/photos/{id}/download"))
                .unwrap(),
        },
        user: None,
    }
}
