use crate::schema::{artists, genres, song_genres, songs};

use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = artists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArtistRow {
  pub id: String,
  pub name: String,
  pub created_at: String,
  pub updated_at: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = artists)]
pub struct NewArtistRow<'a> {
  pub id: String,
  pub name: &'a str,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = genres)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GenreRow {
  pub id: String,
  pub name: String,
  pub created_at: String,
  pub updated_at: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = genres)]
pub struct NewGenreRow<'a> {
  pub id: String,
  pub name: &'a str,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = songs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SongRow {
  pub id: String,
  pub name: String,
  pub artist_id: Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = songs)]
#[diesel(treat_none_as_null = true)]
pub struct NewSongRow<'a> {
  pub id: String,
  pub name: &'a str,
  pub artist_id: Option<String>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = song_genres)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SongGenreRow {
  pub id: String,
  pub song_id: String,
  pub genre_id: String,
  pub position: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = song_genres)]
pub struct NewSongGenreRow {
  pub id: String,
  pub song_id: String,
  pub genre_id: String,
  pub position: i32,
}
