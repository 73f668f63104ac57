//! Shared wiring for service unit tests: memory store, no-op storage, and a
//! manual clock.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;

use inspecthub_auth::jwt::{JwtDecoder, JwtEncoder};
use inspecthub_auth::password::PasswordHasher;
use inspecthub_auth::rbac::AccessGuard;
use inspecthub_auth::Identity;
use inspecthub_core::config::AuthConfig;
use inspecthub_core::traits::clock::ManualClock;
use inspecthub_core::traits::storage::ImageUpload;
use inspecthub_database::MemoryStore;
use inspecthub_entity::inspection::Inspection;
use inspecthub_storage::NoopImageStorage;

use crate::{
    AccountService, AnalyticsService, InspectionService, NewInspection, Registration,
    ReportService,
};

pub(crate) struct Fixture {
    pub accounts: AccountService,
    pub inspections: InspectionService,
    pub reports: ReportService,
    pub analytics: AnalyticsService,
    pub guard: AccessGuard,
    pub storage: Arc<NoopImageStorage>,
    pub clock: ManualClock,
}

impl Fixture {
    pub fn new() -> Self {
        let clock = ManualClock::new(Utc::now());
        let store = MemoryStore::new();
        let storage = Arc::new(NoopImageStorage::new());
        let config = AuthConfig {
            jwt_secret: "service-tests-secret-0123456789abcdef".into(),
            token_ttl_minutes: 60,
        };

        let accounts = AccountService::new(
            Arc::new(store.clone()),
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtEncoder::new(&config, Arc::new(clock.clone()))),
            Arc::new(clock.clone()),
        );
        let inspections = InspectionService::new(
            Arc::new(store.clone()),
            storage.clone(),
            Arc::new(clock.clone()),
        );
        let reports = ReportService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            storage.clone(),
            Arc::new(clock.clone()),
            Duration::from_secs(3600),
        );
        let analytics = AnalyticsService::new(Arc::new(store), 500);
        let guard = AccessGuard::new(JwtDecoder::new(&config, Arc::new(clock.clone())));

        Self {
            accounts,
            inspections,
            reports,
            analytics,
            guard,
            storage,
            clock,
        }
    }

    async fn identity(&self, email: &str, role: &str) -> Identity {
        self.accounts
            .register(Registration {
                name: "Test User".into(),
                email: email.into(),
                password: "pw".into(),
                role: role.into(),
            })
            .await
            .unwrap();
        let outcome = self.accounts.login(email, "pw").await.unwrap();
        self.guard.authenticate(&outcome.token.token).unwrap()
    }

    pub async fn customer(&self, email: &str) -> Identity {
        self.identity(email, "customer").await
    }

    pub async fn pilot(&self, email: &str) -> Identity {
        self.identity(email, "pilot").await
    }

    /// Creates a pending inspection and moves the clock forward, so that
    /// successive inspections have distinct creation times.
    pub async fn new_inspection(&self, customer: &Identity) -> Inspection {
        let inspection = self
            .inspections
            .create(
                customer,
                NewInspection {
                    location: "Site 1".into(),
                    scheduled_date: self.clock_now() + chrono::Duration::days(7),
                    package: "Basic".into(),
                },
            )
            .await
            .unwrap();
        self.clock.advance(chrono::Duration::seconds(1));
        inspection
    }

    pub async fn scheduled_inspection(&self, customer: &Identity, pilot: &Identity) -> Inspection {
        let inspection = self.new_inspection(customer).await;
        self.inspections.assign(pilot, inspection.id).await.unwrap()
    }

    fn clock_now(&self) -> chrono::DateTime<Utc> {
        use inspecthub_core::traits::clock::Clock;
        self.clock.now()
    }
}

pub(crate) fn image(name: &str) -> ImageUpload {
    ImageUpload {
        file_name: name.into(),
        content_type: Some("image/jpeg".into()),
        data: Bytes::from_static(b"\xff\xd8\xff\xe0"),
    }
}
