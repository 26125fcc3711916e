use std::sync::Arc;

use dioxus::prelude::*;
use flashy_core::model::{Quiz, SavedCard};
use storage::Listener;
use storage::repository::StorageError;
use tokio::sync::mpsc;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::FeedEvent;

use super::state::StudyState;

/// Keep the library mirror in step with both live subscriptions.
///
/// Listeners only forward snapshots into a channel; the task below owns the
/// subscriptions, so unmounting the screen drops them and releases the feed.
pub fn use_library_feed(state: StudyState) {
    let ctx = use_context::<AppContext>();
    use_future(move || {
        let sync = ctx.library();
        let mut library = state.library;
        let mut study = state.study;
        async move {
            let Some(sync) = sync else {
                return;
            };

            let (tx, mut rx) = mpsc::unbounded_channel::<FeedEvent>();
            let cards_tx = tx.clone();
            let cards_listener: Listener<SavedCard> =
                Arc::new(move |snapshot: Result<Vec<SavedCard>, StorageError>| {
                    let _ = cards_tx.send(FeedEvent::SavedCards(snapshot));
                });
            let quizzes_tx = tx;
            let quizzes_listener: Listener<Quiz> =
                Arc::new(move |snapshot: Result<Vec<Quiz>, StorageError>| {
                    let _ = quizzes_tx.send(FeedEvent::Quizzes(snapshot));
                });

            let mut subscriptions = Vec::with_capacity(2);
            match sync.subscribe_saved_cards(cards_listener).await {
                Ok(subscription) => subscriptions.push(subscription),
                Err(err) => {
                    tracing::warn!(error = %err, "saved cards subscription failed");
                    study.write().notices_mut().report(ViewError::SavedCardsUnavailable);
                }
            }
            match sync.subscribe_quizzes(quizzes_listener).await {
                Ok(subscription) => subscriptions.push(subscription),
                Err(err) => {
                    tracing::warn!(error = %err, "quiz subscription failed");
                    study.write().notices_mut().report(ViewError::QuizzesUnavailable);
                }
            }
            tracing::debug!(
                user = %sync.user(),
                active = subscriptions.len(),
                "library feed attached"
            );

            while let Some(event) = rx.recv().await {
                if let Some(err) = library.write().apply(event) {
                    study.write().notices_mut().report(err);
                }
            }

            for subscription in subscriptions {
                subscription.unsubscribe();
            }
        }
    });
}
