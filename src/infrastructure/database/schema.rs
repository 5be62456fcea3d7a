diesel::table! {
    documents (id) {
        id -> Int4,
        #[max_length = 255]
        file_name -> Varchar,
        chunk_index -> Int4,
        content -> Nullable<Text>,
        created_at -> Nullable<Timestamptz>,
    }
}
