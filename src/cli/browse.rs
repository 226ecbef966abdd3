use tabled::Table;

use crate::{
    catalog::CatalogService,
    error, info,
    types::{AlbumTableRow, CategoryTableRow, PlaylistTableRow},
    utils, warning,
};

use super::{print_json, spinner};

const DESCRIPTION_WIDTH: usize = 60;

/// Prints the first page of browse categories.
pub async fn categories(service: &CatalogService, json: bool) {
    let pb = spinner("Fetching categories...");
    let result = service.get_categories().await;
    pb.finish_and_clear();

    let categories = match result {
        Ok(categories) => categories,
        Err(e) => error!("Failed to fetch categories: {}", e),
    };

    if json {
        print_json(&categories);
        return;
    }

    if categories.is_empty() {
        warning!("The catalog returned no categories.");
        return;
    }

    let rows: Vec<CategoryTableRow> = categories
        .into_iter()
        .map(|c| CategoryTableRow {
            name: c.name,
            id: c.id,
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Prints new album releases, newest first.
///
/// Release dates are compared as strings since the catalog mixes `YYYY`,
/// `YYYY-MM` and `YYYY-MM-DD` precision; this keeps the order stable without
/// reparsing them.
pub async fn releases(service: &CatalogService, json: bool) {
    let pb = spinner("Fetching new releases...");
    let result = service.get_new_releases().await;
    pb.finish_and_clear();

    let albums = match result {
        Ok(albums) => albums,
        Err(e) => error!("Failed to fetch new releases: {}", e),
    };

    if json {
        print_json(&albums);
        return;
    }

    if albums.is_empty() {
        warning!("The catalog returned no new releases.");
        return;
    }

    let mut rows: Vec<AlbumTableRow> = albums
        .into_iter()
        .map(|a| AlbumTableRow {
            artists: utils::join_artists(&a.artists),
            date: a.release_date,
            name: a.name,
        })
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.artists.cmp(&b.artists)));

    println!("{}", Table::new(rows));
}

/// Prints the featured playlists with their track counts.
pub async fn playlists(service: &CatalogService, json: bool) {
    let pb = spinner("Fetching featured playlists...");
    let result = service.get_featured_playlists().await;
    pb.finish_and_clear();

    let playlists = match result {
        Ok(playlists) => playlists,
        Err(e) => error!("Failed to fetch featured playlists: {}", e),
    };

    if json {
        print_json(&playlists);
        return;
    }

    if playlists.is_empty() {
        warning!("The catalog returned no featured playlists.");
        return;
    }

    let total: u64 = playlists.iter().map(|p| p.track_count).sum();
    let rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            name: p.name,
            tracks: p.track_count,
            description: utils::truncate(&p.description, DESCRIPTION_WIDTH),
        })
        .collect();

    println!("{}", Table::new(rows));
    info!("{} tracks in total", total);
}
