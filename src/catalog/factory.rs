use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::gateway::factory::create_publisher;
use crate::gateway::GatewayPublisherVia;

pub fn create_catalog_service(via: GatewayPublisherVia) -> Box<dyn CatalogService> {
    Box::new(CatalogServiceImpl::new(create_publisher(via)))
}
