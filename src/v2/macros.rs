/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

// Declares the JSON envelope of a list response, `{"<field>": [ ... ]}`
macro_rules! list_envelope {
    ( $name:ident, $field:tt, $item:ty ) => {
        #[derive(serde::Deserialize, Debug)]
        pub(crate) struct $name {
            #[serde(rename = $field)]
            items: Vec<$item>,
        }

        impl $crate::v2::pager::Envelope for $name {
            type Item = $item;

            fn into_items(self) -> Vec<$item> {
                self.items
            }
        }
    };
}

// Builds the url for a single object of a resource, percent-encoding the id
macro_rules! obj_url {
    ( $c:expr, $base:expr, $id:expr ) => {{
        $c.api()
            .url_for(&format!("{}/{}", $base, urlencoding::encode($id)))
    }};
    ( $c:expr, $base:expr, $id:expr, $suffix:literal ) => {{
        $c.api().url_for(&format!(
            "{}/{}/{}",
            $base,
            urlencoding::encode($id),
            $suffix
        ))
    }};
}

pub(crate) use {list_envelope, obj_url};
