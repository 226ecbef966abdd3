use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    catalog::CatalogClient,
    error::{Error, Res},
    types::{
        Album, AlbumItem, CategoriesResponse, Category, CategoryItem, FeaturedPlaylistsResponse,
        NewReleasesResponse, Playlist, PlaylistItem,
    },
    utils,
};

/// Number of items requested from paged browse endpoints.
pub const PAGE_SIZE: u32 = 12;

const CATEGORIES_ENDPOINT: &str = "browse/categories";
const NEW_RELEASES_ENDPOINT: &str = "browse/new-releases";
const FEATURED_PLAYLISTS_ENDPOINT: &str = "browse/featured-playlists";

/// Read-only browse operations returning normalized records.
///
/// Every call performs exactly one catalog request. Failures from the token
/// manager or the client are returned unchanged and never replaced by
/// fallback data; the image placeholder only covers items that arrive
/// without artwork.
pub struct CatalogService {
    client: CatalogClient,
}

impl CatalogService {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub async fn get_categories(&self) -> Res<Vec<Category>> {
        let response = self
            .client
            .request(CATEGORIES_ENDPOINT, &page_params())
            .await?;
        normalize_categories(response)
    }

    pub async fn get_new_releases(&self) -> Res<Vec<Album>> {
        let response = self
            .client
            .request(NEW_RELEASES_ENDPOINT, &page_params())
            .await?;
        normalize_new_releases(response)
    }

    pub async fn get_featured_playlists(&self) -> Res<Vec<Playlist>> {
        let response = self
            .client
            .request(FEATURED_PLAYLISTS_ENDPOINT, &[])
            .await?;
        normalize_featured_playlists(response)
    }
}

fn page_params() -> [(&'static str, String); 1] {
    [("limit", PAGE_SIZE.to_string())]
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Res<T> {
    serde_json::from_value(value).map_err(|e| Error::Payload(format!("{endpoint}: {e}")))
}

pub fn normalize_categories(value: Value) -> Res<Vec<Category>> {
    let response: CategoriesResponse = decode(CATEGORIES_ENDPOINT, value)?;
    Ok(response
        .categories
        .items
        .into_iter()
        .map(category_from_item)
        .collect())
}

pub fn normalize_new_releases(value: Value) -> Res<Vec<Album>> {
    let response: NewReleasesResponse = decode(NEW_RELEASES_ENDPOINT, value)?;
    Ok(response.albums.items.into_iter().map(album_from_item).collect())
}

pub fn normalize_featured_playlists(value: Value) -> Res<Vec<Playlist>> {
    let response: FeaturedPlaylistsResponse = decode(FEATURED_PLAYLISTS_ENDPOINT, value)?;
    Ok(response
        .playlists
        .items
        .into_iter()
        .map(playlist_from_item)
        .collect())
}

fn category_from_item(item: CategoryItem) -> Category {
    Category {
        icon_url: utils::first_image_url(item.icons.as_deref()),
        id: item.id,
        name: item.name,
    }
}

fn album_from_item(item: AlbumItem) -> Album {
    Album {
        artists: item.artists.into_iter().map(|a| a.name).collect(),
        image_url: utils::first_image_url(item.images.as_deref()),
        external_url: utils::external_url(item.external_urls.as_ref()),
        id: item.id,
        name: item.name,
        release_date: item.release_date,
    }
}

fn playlist_from_item(item: PlaylistItem) -> Playlist {
    Playlist {
        image_url: utils::first_image_url(item.images.as_deref()),
        external_url: utils::external_url(item.external_urls.as_ref()),
        track_count: item.tracks.map_or(0, |t| t.total),
        description: item.description.unwrap_or_default(),
        id: item.id,
        name: item.name,
    }
}
