table! {
    comment (id) {
        id -> Int4,
        content -> Text,
        user_id -> Int4,
        post_id -> Int4,
        parent_id -> Nullable<Int4>,
        layer_id -> Nullable<Int4>,
        created_at -> Timestamp,
    }
}

table! {
    comment_like (id) {
        id -> Int4,
        user_id -> Int4,
        comment_id -> Int4,
        created_at -> Timestamp,
    }
}

table! {
    post (id) {
        id -> Int4,
        name -> Text,
        user_id -> Int4,
        created_at -> Timestamp,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Text,
        degree -> Nullable<Text>,
        pfp_url -> Nullable<Text>,
        email -> Nullable<Text>,
        bio -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

joinable!(comment -> users (user_id));
joinable!(comment -> post (post_id));
joinable!(comment_like -> comment (comment_id));
joinable!(comment_like -> users (user_id));
joinable!(post -> users (user_id));

allow_tables_to_appear_in_same_query!(comment, comment_like, post, users,);
