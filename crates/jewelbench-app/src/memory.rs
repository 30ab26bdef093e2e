// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Process-local collaborators for demo sessions.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow, bail};

use crate::{Client, ClientStore, ImagePreview, ImageRef, ImageStore, demo_clients};

/// Client store backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryClientStore {
    clients: Vec<Client>,
}

impl MemoryClientStore {
    pub fn new(clients: Vec<Client>) -> Self {
        Self { clients }
    }

    pub fn with_demo_clients() -> Self {
        Self::new(demo_clients())
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }
}

impl ClientStore for MemoryClientStore {
    fn load(&self) -> Result<Vec<Client>> {
        Ok(self.clients.clone())
    }

    fn save(&mut self, client: &Client) -> Result<Client> {
        match self.clients.iter_mut().find(|existing| existing.id == client.id) {
            Some(existing) => *existing = client.clone(),
            None => self.clients.push(client.clone()),
        }
        Ok(client.clone())
    }
}

#[derive(Debug, Clone)]
struct StoredImage {
    file_name: String,
    size_bytes: usize,
}

/// Holds uploaded photos for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    images: BTreeMap<ImageRef, StoredImage>,
    last_ref: i64,
}

impl MemoryImageStore {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn contains(&self, image: ImageRef) -> bool {
        self.images.contains_key(&image)
    }
}

impl ImageStore for MemoryImageStore {
    fn upload(&mut self, file_name: &str, data: &[u8]) -> Result<ImageRef> {
        if data.is_empty() {
            bail!("image {file_name} is empty -- choose a photo with content");
        }
        let image = ImageRef::new(self.last_ref)
            .checked_next()
            .ok_or_else(|| anyhow!("image store is full -- restart the session"))?;
        self.last_ref = image.get();
        self.images.insert(
            image,
            StoredImage {
                file_name: file_name.to_owned(),
                size_bytes: data.len(),
            },
        );
        tracing::debug!(image = image.get(), file_name, "image stored");
        Ok(image)
    }

    fn preview(&self, image: ImageRef) -> Result<ImagePreview> {
        let stored = self
            .images
            .get(&image)
            .ok_or_else(|| anyhow!("image {image} not found"))?;
        Ok(ImagePreview {
            image,
            file_name: stored.file_name.clone(),
            mime_type: mime_for(&stored.file_name).to_owned(),
            size_bytes: stored.size_bytes,
        })
    }

    fn release(&mut self, image: ImageRef) {
        self.images.remove(&image);
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}
