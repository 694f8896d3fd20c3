//! Group registry: membership tracking and group fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::{
    Backplane, BroadcastRouter, GroupName, RoomEvent, RouterError, SessionId, SessionSender,
};
use crate::infrastructure::dto::encode_event;

/// Local members of one group, plus the task draining the group's backplane
/// subscription into them.
struct GroupEntry {
    members: HashMap<SessionId, SessionSender>,
    forwarder: JoinHandle<()>,
}

/// Concrete broadcast router.
///
/// All fan-out runs through the backplane, including to members hosted by
/// this process: `broadcast` only publishes, and the per-group forwarder
/// task delivers whatever arrives on the subscription to the local member
/// set. One delivery path means local and remote members observe the same
/// ordered event stream.
///
/// The backplane subscription for a group is established while the first
/// `join` for it is still running, so a session that joins and then
/// broadcasts receives its own event.
pub struct GroupRegistry {
    groups: Arc<Mutex<HashMap<GroupName, GroupEntry>>>,
    backplane: Arc<dyn Backplane>,
}

impl GroupRegistry {
    pub fn new(backplane: Arc<dyn Backplane>) -> Self {
        Self {
            groups: Arc::new(Mutex::new(HashMap::new())),
            backplane,
        }
    }

    /// Number of sessions currently joined to `group` on this process.
    pub async fn member_count(&self, group: &GroupName) -> usize {
        let groups = self.groups.lock().await;
        groups.get(group).map_or(0, |entry| entry.members.len())
    }
}

#[async_trait]
impl BroadcastRouter for GroupRegistry {
    async fn join(
        &self,
        group: &GroupName,
        session: SessionId,
        sender: SessionSender,
    ) -> Result<(), RouterError> {
        let mut groups = self.groups.lock().await;
        if let Some(entry) = groups.get_mut(group) {
            entry.members.entry(session).or_insert(sender);
            return Ok(());
        }

        // First member on this process: wire the group to the backplane
        // before exposing it.
        let mut subscription = self.backplane.subscribe(group.as_str()).await?;
        let groups_ref = Arc::clone(&self.groups);
        let group_key = group.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(payload) = subscription.recv().await {
                let mut groups = groups_ref.lock().await;
                let Some(entry) = groups.get_mut(&group_key) else {
                    break;
                };
                let mut closed = Vec::new();
                for (member, sender) in entry.members.iter() {
                    if sender.send(payload.clone()).is_err() {
                        closed.push(member.clone());
                    }
                }
                // A member whose transport already closed is dropped here;
                // its failure never reaches the other members.
                for member in closed {
                    tracing::debug!(
                        "Removing closed session '{}' from group '{}'",
                        member,
                        group_key
                    );
                    entry.members.remove(&member);
                }
            }
        });

        let mut members = HashMap::new();
        members.insert(session, sender);
        groups.insert(group.clone(), GroupEntry { members, forwarder });
        tracing::debug!("Subscribed group '{}' to the backplane", group);
        Ok(())
    }

    async fn leave(&self, group: &GroupName, session: &SessionId) {
        let mut groups = self.groups.lock().await;
        let Some(entry) = groups.get_mut(group) else {
            return;
        };
        entry.members.remove(session);
        if entry.members.is_empty() {
            if let Some(entry) = groups.remove(group) {
                entry.forwarder.abort();
                tracing::debug!("Dropped empty group '{}'", group);
            }
        }
    }

    async fn broadcast(&self, group: &GroupName, event: &RoomEvent) -> Result<(), RouterError> {
        let payload = encode_event(event);
        self.backplane.publish(group.as_str(), payload).await?;
        Ok(())
    }
}
