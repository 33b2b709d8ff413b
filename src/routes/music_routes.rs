use actix_web::web;

use crate::error::AppError;
use crate::handlers::music_handlers::{
    comment_album, comment_song, create_album, create_album_form, create_song, create_song_form,
    delete_album, delete_song, get_album, get_song, like_album, like_song, list_songs,
    list_songs_by_user, replay_song,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/music")
            // Malformed ids answer like missing rows, not like a parse error.
            .app_data(web::PathConfig::default().error_handler(|_, _| AppError::NotFound.into()))
            .route("", web::get().to(list_songs))
            .route("/", web::get().to(list_songs))
            .route("/song/{id}", web::get().to(get_song))
            .route("/song/{id}", web::delete().to(delete_song))
            .route("/song/{id}/like", web::post().to(like_song))
            .route("/song/{id}/replay", web::post().to(replay_song))
            .route("/song/{id}/comment", web::post().to(comment_song))
            .route("/create/song", web::get().to(create_song_form))
            .route("/create/song", web::post().to(create_song))
            .route("/album/{id}", web::get().to(get_album))
            .route("/album/{id}", web::delete().to(delete_album))
            .route("/album/{id}/like", web::post().to(like_album))
            .route("/album/{id}/comment", web::post().to(comment_album))
            .route("/create/album", web::get().to(create_album_form))
            .route("/create/album", web::post().to(create_album))
            .route("/user/{user_id}/songs", web::get().to(list_songs_by_user)),
    );
}
