pub mod artist;
pub mod genre;
pub mod ids;
pub mod song;

pub use artist::Artist;
pub use genre::{Genre, split_genre_names};
pub use ids::{ArtistId, GenreId, SongGenreId, SongId};
pub use song::{NewSong, Song, SongEdit, SongGenre, SongState};
