use nazaris_core_contact_impl::ContactFeatureServiceImpl;
use nazaris_core_health_impl::HealthFeatureServiceImpl;
use nazaris_core_site_impl::SiteFeatureServiceImpl;
use nazaris_email_impl::EmailServiceImpl;
use nazaris_shared_impl::fs::FileSystemServiceImpl;

// API
pub type RestServer = nazaris_api_rest::RestServer<Health, Contact, Site>;

// Email
pub type Email = EmailServiceImpl;

// Shared
pub type FileSystem = FileSystemServiceImpl;

// Core
pub type Contact = ContactFeatureServiceImpl<Email>;
pub type Health = HealthFeatureServiceImpl<Email, FileSystem>;
pub type Site = SiteFeatureServiceImpl<FileSystem>;
