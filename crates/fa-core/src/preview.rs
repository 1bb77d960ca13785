// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use base64::{engine::general_purpose::STANDARD, Engine as _};
use fa_api_contract::LeafImage;

/// `data:` URL of an image, as used for the upload preview
pub fn data_url(image: &LeafImage) -> String {
    format!("data:{};base64,{}", image.content_type, STANDARD.encode(&image.bytes))
}
