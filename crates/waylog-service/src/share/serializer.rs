//! The redaction serializer.
//!
//! Given a validated, live share link, loads the underlying record graph
//! and produces the exact payload a guest may see. Redaction of loaded rows
//! is pure and synchronous; only record loads and signed-URL issuance are
//! async, and independent loads fan out concurrently.
//!
//! The serializer never mutates anything.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::future::{try_join, try_join_all};
use uuid::Uuid;

use waylog_core::error::AppError;
use waylog_core::result::AppResult;
use waylog_core::traits::UrlSigner;
use waylog_database::repositories::media::MediaRepository;
use waylog_database::repositories::moment::MomentRepository;
use waylog_database::repositories::profile::ProfileRepository;
use waylog_database::repositories::trip::TripRepository;
use waylog_entity::media::MediaAsset;
use waylog_entity::moment::Moment;
use waylog_entity::share::{PrivacyPolicy, ShareLink, ShareScope, VisibilityPolicy};
use waylog_entity::trip::Trip;

use super::access::dead_link;
use super::payload::{
    MediaView, OwnerView, ProfileSharePayload, ProfileStats, SharePayload, StoryEntryView,
    TripSharePayload, TripView,
};

/// Builds guest payloads from the record graph under a link's policies.
#[derive(Debug, Clone)]
pub struct RedactionSerializer {
    trips: Arc<TripRepository>,
    moments: Arc<MomentRepository>,
    media: Arc<MediaRepository>,
    profiles: Arc<ProfileRepository>,
    signer: Arc<dyn UrlSigner>,
    media_bucket: String,
    url_ttl: Duration,
}

impl RedactionSerializer {
    /// Create a new serializer.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trips: Arc<TripRepository>,
        moments: Arc<MomentRepository>,
        media: Arc<MediaRepository>,
        profiles: Arc<ProfileRepository>,
        signer: Arc<dyn UrlSigner>,
        media_bucket: String,
        url_ttl: Duration,
    ) -> Self {
        Self {
            trips,
            moments,
            media,
            profiles,
            signer,
            media_bucket,
            url_ttl,
        }
    }

    /// Produce the payload for a live share link.
    ///
    /// The caller has already passed the liveness gate; this only adds the
    /// target-existence check (a trip deleted after the link was created is
    /// indistinguishable from a dead link).
    pub async fn serialize(&self, link: &ShareLink) -> AppResult<SharePayload> {
        match link.scope {
            ShareScope::Trip => self.trip_payload(link).await.map(SharePayload::Trip),
            ShareScope::Profile => self.profile_payload(link).await.map(SharePayload::Profile),
        }
    }

    async fn trip_payload(&self, link: &ShareLink) -> AppResult<TripSharePayload> {
        let target_id = link
            .target_id
            .ok_or_else(|| AppError::internal("Trip-scope link has no target"))?;

        let trip = self
            .trips
            .find_live_for_owner(target_id, link.owner_id)
            .await?
            .ok_or_else(dead_link)?;

        let privacy = link.privacy();
        let visibility = link.visibility();

        let owner = self.owner_view(link.owner_id, &visibility).await?;

        let (moment_count, media_count) = if visibility.show_stats {
            try_join(
                self.moments.count_live_by_trip(trip.id),
                self.media.count_live_by_trip(trip.id),
            )
            .await?
        } else {
            (0, 0)
        };

        let story_entries = self.story_entries(trip.id, &privacy, &visibility).await?;

        Ok(TripSharePayload {
            share_link_id: link.id,
            owner,
            trip: redact_trip(&trip, &privacy, &visibility, moment_count, media_count),
            story_entries,
            privacy,
            visibility,
        })
    }

    async fn profile_payload(&self, link: &ShareLink) -> AppResult<ProfileSharePayload> {
        let privacy = link.privacy();
        let visibility = link.visibility();

        let owner = self.owner_view(link.owner_id, &visibility).await?;
        let trips = self.trips.list_live_by_owner(link.owner_id).await?;

        let stats = if visibility.show_stats {
            let (moment_count, media_count) = try_join(
                self.moments.count_live_by_owner(link.owner_id),
                self.media.count_live_by_owner(link.owner_id),
            )
            .await?;
            ProfileStats {
                trip_count: trips.len() as i64,
                moment_count,
                media_count,
                country_count: distinct_countries(&trips),
            }
        } else {
            ProfileStats::default()
        };

        let trip_views = if visibility.show_trip_list {
            let (moment_counts, media_counts) = if visibility.show_stats {
                let (m, a) = try_join(
                    self.moments.counts_by_trip_for_owner(link.owner_id),
                    self.media.counts_by_trip_for_owner(link.owner_id),
                )
                .await?;
                (
                    m.into_iter().collect::<HashMap<_, _>>(),
                    a.into_iter().collect::<HashMap<_, _>>(),
                )
            } else {
                (HashMap::new(), HashMap::new())
            };

            trips
                .iter()
                .map(|trip| {
                    redact_trip(
                        trip,
                        &privacy,
                        &visibility,
                        moment_counts.get(&trip.id).copied().unwrap_or(0),
                        media_counts.get(&trip.id).copied().unwrap_or(0),
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(ProfileSharePayload {
            share_link_id: link.id,
            owner,
            stats,
            trips: trip_views,
            privacy,
            visibility,
        })
    }

    /// Owner block, entirely omitted unless `show_owner`.
    async fn owner_view(
        &self,
        owner_id: Uuid,
        visibility: &VisibilityPolicy,
    ) -> AppResult<Option<OwnerView>> {
        if !visibility.show_owner {
            return Ok(None);
        }
        let Some(profile) = self.profiles.find_by_id(owner_id).await? else {
            return Ok(None);
        };
        Ok(Some(OwnerView {
            id: profile.id,
            display_name: profile.display_name,
            avatar_url: profile.avatar_url,
            bio: if visibility.show_profile_bio {
                profile.bio
            } else {
                None
            },
        }))
    }

    /// Timeline entries with permitted media; empty unless `show_moments`.
    async fn story_entries(
        &self,
        trip_id: Uuid,
        privacy: &PrivacyPolicy,
        visibility: &VisibilityPolicy,
    ) -> AppResult<Vec<StoryEntryView>> {
        if !visibility.show_moments {
            return Ok(Vec::new());
        }

        let moments = self.moments.list_live_by_trip(trip_id).await?;

        let mut media_by_moment = if visibility.show_media {
            let ids: Vec<Uuid> = moments.iter().map(|m| m.id).collect();
            group_by_moment(self.media.list_by_moments(&ids).await?)
        } else {
            HashMap::new()
        };

        // Independent per-moment media signing fans out concurrently.
        try_join_all(moments.into_iter().map(|moment| {
            let assets = media_by_moment.remove(&moment.id).unwrap_or_default();
            self.story_entry(moment, assets, privacy)
        }))
        .await
    }

    async fn story_entry(
        &self,
        moment: Moment,
        assets: Vec<MediaAsset>,
        privacy: &PrivacyPolicy,
    ) -> AppResult<StoryEntryView> {
        let media = media_views(
            self.signer.as_ref(),
            &self.media_bucket,
            self.url_ttl,
            assets,
            privacy.allow_downloads,
        )
        .await?;

        Ok(StoryEntryView {
            id: moment.id,
            title: moment.title,
            note: moment.note,
            taken_at: if privacy.hide_exact_dates {
                None
            } else {
                moment.taken_at
            },
            media,
        })
    }
}

/// Apply the per-field redaction rules to one trip row.
pub(crate) fn redact_trip(
    trip: &Trip,
    privacy: &PrivacyPolicy,
    visibility: &VisibilityPolicy,
    moment_count: i64,
    media_count: i64,
) -> TripView {
    TripView {
        id: trip.id,
        title: trip.title.clone(),
        description: if visibility.show_trip_descriptions {
            trip.description.clone()
        } else {
            None
        },
        location_name: trip.location_name.clone(),
        country_code: trip.country_code.clone(),
        lat: if visibility.show_globe { trip.lat } else { None },
        lng: if visibility.show_globe { trip.lng } else { None },
        start_date: if privacy.hide_exact_dates {
            None
        } else {
            trip.start_date
        },
        end_date: if privacy.hide_exact_dates {
            None
        } else {
            trip.end_date
        },
        date_label: date_label(trip.start_date, trip.end_date, privacy.hide_exact_dates),
        cover_url: trip.cover_url.clone(),
        tags: if visibility.show_tags {
            trip.tags.clone()
        } else {
            Vec::new()
        },
        moment_count: if visibility.show_stats {
            moment_count
        } else {
            0
        },
        media_count: if visibility.show_stats { media_count } else { 0 },
    }
}

/// Human-readable date label at the policy's precision.
///
/// Hidden precision reduces to month + year; when both endpoints produce
/// the same label (e.g. a trip inside one month), the range collapses to a
/// single label instead of a duplicated one.
pub(crate) fn date_label(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    hide_exact_dates: bool,
) -> Option<String> {
    let fmt = |d: NaiveDate| {
        if hide_exact_dates {
            d.format("%b %Y").to_string()
        } else {
            d.format("%b %-d, %Y").to_string()
        }
    };
    match (start, end) {
        (None, None) => None,
        (Some(d), None) | (None, Some(d)) => Some(fmt(d)),
        (Some(start), Some(end)) => {
            let (a, b) = (fmt(start), fmt(end));
            if a == b {
                Some(a)
            } else {
                Some(format!("{a} – {b}"))
            }
        }
    }
}

/// Distinct non-null country codes across a trip list.
fn distinct_countries(trips: &[Trip]) -> i64 {
    trips
        .iter()
        .filter_map(|t| t.country_code.as_deref())
        .collect::<HashSet<_>>()
        .len() as i64
}

/// Group media rows by moment, preserving their SQL ordering.
fn group_by_moment(assets: Vec<MediaAsset>) -> HashMap<Uuid, Vec<MediaAsset>> {
    let mut grouped: HashMap<Uuid, Vec<MediaAsset>> = HashMap::new();
    for asset in assets {
        grouped.entry(asset.moment_id).or_default().push(asset);
    }
    grouped
}

/// Sign preview + full URLs for a moment's media in order.
async fn media_views(
    signer: &dyn UrlSigner,
    bucket: &str,
    ttl: Duration,
    assets: Vec<MediaAsset>,
    allow_downloads: bool,
) -> AppResult<Vec<MediaView>> {
    try_join_all(assets.into_iter().map(|asset| async move {
        let preview_path = asset
            .thumbnail_path
            .as_deref()
            .unwrap_or(&asset.storage_path);
        let (preview_url, full_url) = try_join(
            signer.signed_url(bucket, preview_path, ttl),
            signer.signed_url(bucket, &asset.storage_path, ttl),
        )
        .await?;
        Ok(MediaView {
            id: asset.id,
            kind: asset.kind,
            width: asset.width,
            height: asset.height,
            preview_url,
            download_url: allow_downloads.then_some(full_url),
        })
    }))
    .await
}
