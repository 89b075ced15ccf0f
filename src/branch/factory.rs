use crate::branch::domain::BranchService;
use crate::branch::domain::service::BranchServiceImpl;
use crate::branch::dto::BranchDto;
use crate::core::domain::Configuration;
use crate::gateway::factory::create_publisher;
use crate::gateway::GatewayPublisherVia;

pub fn create_branch_service(config: &Configuration, branch: BranchDto, via: GatewayPublisherVia) -> Box<dyn BranchService> {
    Box::new(BranchServiceImpl::new(config, branch, create_publisher(via)))
}
