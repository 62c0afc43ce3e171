// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `DirectoryFrameSource`: the external collaborator `line21-core` is written
//! against. Walks a directory of already-extracted frame images (the output
//! of an operator-run transcode step, out of scope for this crate) in
//! numeric filename order and exposes each one as a `line21_core::Frame`.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use line21_core::errors::Result;
use line21_core::{Frame, FrameSource};

/// One decoded frame image, backed by an `image::DynamicImage`. Luma is the
/// average of R, G, and B — the averaging step the core's `Frame` contract
/// explicitly leaves to the frame source rather than the sampler.
struct ImageFrame {
    image: DynamicImage,
}

impl Frame for ImageFrame {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn luma(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return 0;
        }
        let px = self.image.get_pixel(x as u32, y as u32);
        let [r, g, b, _] = px.0;
        ((r as u32 + g as u32 + b as u32) / 3) as u8
    }

    fn release(self: Box<Self>) {
        drop(self);
    }
}

/// Extracts the leading run of ASCII digits from a file stem, for numeric
/// (rather than lexicographic) ordering of frame files like `frame2.png`
/// sorting before `frame10.png`.
fn numeric_key(path: &Path) -> (u64, String) {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let digits: String = stem.chars().filter(|c| c.is_ascii_digit()).collect();
    let n = digits.parse().unwrap_or(0);
    (n, stem.to_string())
}

pub struct DirectoryFrameSource {
    paths: std::vec::IntoIter<PathBuf>,
}

impl DirectoryFrameSource {
    pub fn open(dir: &Path) -> std::io::Result<Self> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file())
            .collect();
        paths.sort_by(|a, b| numeric_key(a).cmp(&numeric_key(b)));
        Ok(DirectoryFrameSource { paths: paths.into_iter() })
    }
}

impl FrameSource for DirectoryFrameSource {
    fn next_frame(&mut self) -> Result<Option<Box<dyn Frame>>> {
        let Some(path) = self.paths.next() else { return Ok(None) };
        let image = image::open(&path).map_err(|err| {
            line21_core::Line21Error::FrameSource(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{}: {}", path.display(), err),
            )))
        })?;
        Ok(Some(Box::new(ImageFrame { image })))
    }
}
