use roster_core::{LoadError, UserListItem};
use serde::Deserialize;

use crate::{ServerPageToken, UserPage};

#[derive(Debug, Deserialize)]
struct ResponseDto {
    results: Vec<UserDto>,
    info: InfoDto,
}

#[derive(Debug, Deserialize)]
struct InfoDto {
    seed: ServerPageToken,
    results: u32,
    page: u32,
    #[allow(dead_code)]
    version: String,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    #[allow(dead_code)]
    gender: String,
    name: NameDto,
    location: LocationDto,
    email: String,
    login: LoginDto,
    #[allow(dead_code)]
    dob: DobDto,
    picture: PictureDto,
}

#[derive(Debug, Deserialize)]
struct DobDto {
    #[allow(dead_code)]
    age: u32,
}

#[derive(Debug, Deserialize)]
struct NameDto {
    title: String,
    first: String,
    last: String,
}

#[derive(Debug, Deserialize)]
struct LocationDto {
    state: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct LoginDto {
    uuid: String,
}

#[derive(Debug, Deserialize)]
struct PictureDto {
    large: String,
    medium: String,
    thumbnail: String,
}

/// Decodes a response body into a page. Any missing or mistyped field fails
/// the whole page.
pub fn decode_page(body: &[u8]) -> Result<UserPage, LoadError> {
    let response: ResponseDto =
        serde_json::from_slice(body).map_err(|err| LoadError::Decoding(err.to_string()))?;

    let items = response.results.into_iter().map(map_user).collect();
    Ok(UserPage {
        items,
        server_page: response.info.page,
        server_page_size: response.info.results,
        page_token: response.info.seed,
    })
}

fn map_user(user: UserDto) -> UserListItem {
    let display_name = format!(
        "[{}]{} {}",
        user.name.title, user.name.first, user.name.last
    );
    let subtitle = format!("{} {}", user.location.state, user.location.country);
    UserListItem::new(user.login.uuid, display_name, subtitle, user.email).with_images(
        image_url(&user.picture.thumbnail),
        image_url(&user.picture.medium),
        image_url(&user.picture.large),
    )
}

/// Unparseable image references are treated as absent.
fn image_url(raw: &str) -> Option<String> {
    url::Url::parse(raw).ok().map(|url| url.to_string())
}
