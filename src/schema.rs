diesel::table! {
    users (id) {
        id -> Integer,
        #[max_length = 15]
        username -> Varchar,
        #[max_length = 125]
        email -> Varchar,
        password_hash -> Text,
        recover_password -> Text,
        #[max_length = 10]
        role -> Varchar,
        created_at -> Timestamp,
        created_on -> Date,
        updated_at -> Timestamp,
        updated_on -> Date,
    }
}

diesel::table! {
    user_information (user_id) {
        user_id -> Integer,
        #[max_length = 50]
        display_name -> Nullable<Varchar>,
        #[max_length = 50]
        first_name -> Nullable<Varchar>,
        #[max_length = 50]
        last_name -> Nullable<Varchar>,
        #[max_length = 50]
        country -> Nullable<Varchar>,
        #[max_length = 50]
        city -> Nullable<Varchar>,
        bio -> Nullable<Text>,
        created_at -> Timestamp,
        created_on -> Date,
        updated_at -> Timestamp,
        updated_on -> Date,
    }
}

diesel::table! {
    user_media (user_id) {
        user_id -> Integer,
        profile_img_url -> Text,
        banner_img_url -> Text,
        created_at -> Timestamp,
        created_on -> Date,
        updated_at -> Timestamp,
        updated_on -> Date,
    }
}

diesel::table! {
    user_socials (id) {
        id -> Integer,
        user_id -> Integer,
        url -> Text,
        #[max_length = 50]
        name -> Varchar,
        created_at -> Timestamp,
        created_on -> Date,
        updated_at -> Timestamp,
        updated_on -> Date,
    }
}

diesel::table! {
    songs (id) {
        id -> Integer,
        user_id -> Integer,
        url_song -> Text,
        title -> Text,
        description -> Nullable<Text>,
        #[max_length = 50]
        genre -> Nullable<Varchar>,
        #[sql_name = "type"]
        #[max_length = 20]
        kind -> Varchar,
        #[max_length = 30]
        license -> Varchar,
        replay -> Integer,
        likes -> Integer,
        song_img_url -> Text,
        created_at -> Timestamp,
        created_on -> Date,
        updated_at -> Timestamp,
        updated_on -> Date,
    }
}

diesel::table! {
    albums (id) {
        id -> Integer,
        user_id -> Integer,
        #[max_length = 100]
        name -> Varchar,
        date -> Nullable<Date>,
        likes -> Integer,
        album_img_url -> Text,
        created_at -> Timestamp,
        created_on -> Date,
        updated_at -> Timestamp,
        updated_on -> Date,
    }
}

diesel::table! {
    album_songs (album_id, song_id) {
        album_id -> Integer,
        song_id -> Integer,
    }
}

diesel::table! {
    comment_songs (id) {
        id -> Integer,
        song_id -> Integer,
        text -> Text,
        likes -> Integer,
        created_at -> Timestamp,
        created_on -> Date,
        updated_at -> Timestamp,
        updated_on -> Date,
    }
}

diesel::table! {
    comment_albums (id) {
        id -> Integer,
        album_id -> Integer,
        text -> Text,
        likes -> Integer,
        created_at -> Timestamp,
        created_on -> Date,
        updated_at -> Timestamp,
        updated_on -> Date,
    }
}

diesel::table! {
    sessions (id) {
        id -> Integer,
        user_id -> Integer,
        #[max_length = 36]
        token -> Varchar,
        created_at -> Timestamp,
        expires_at -> Timestamp,
    }
}

diesel::joinable!(user_information -> users (user_id));
diesel::joinable!(user_media -> users (user_id));
diesel::joinable!(user_socials -> users (user_id));
diesel::joinable!(songs -> users (user_id));
diesel::joinable!(albums -> users (user_id));
diesel::joinable!(album_songs -> albums (album_id));
diesel::joinable!(album_songs -> songs (song_id));
diesel::joinable!(comment_songs -> songs (song_id));
diesel::joinable!(comment_albums -> albums (album_id));
diesel::joinable!(sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    user_information,
    user_media,
    user_socials,
    songs,
    albums,
    album_songs,
    comment_songs,
    comment_albums,
    sessions,
);
