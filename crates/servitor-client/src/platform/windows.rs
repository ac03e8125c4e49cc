use std::ffi::OsStr;
use std::io;

use windows_service::service::{
    Service, ServiceAccess, ServiceErrorControl, ServiceInfo, ServiceStartType, ServiceType,
};
use windows_service::service_manager::{ServiceManager, ServiceManagerAccess};

use crate::{Builder, Manager};

#[derive(Clone)]
pub struct WindowsServiceManager {
    config: Builder,
}

impl WindowsServiceManager {
    pub(crate) fn from_builder(config: Builder) -> io::Result<Self> {
        Ok(Self { config })
    }

    fn get_manager(&self, access: ServiceManagerAccess) -> io::Result<ServiceManager> {
        ServiceManager::local_computer(None::<&str>, access).map_err(|e| {
            io_error(format!(
                "error connecting to the local service manager: {e:?}"
            ))
        })
    }

    fn open_service(&self, access: ServiceAccess) -> io::Result<Service> {
        self.get_manager(ServiceManagerAccess::CONNECT)?
            .open_service(self.config.name(), access)
            .map_err(|e| io_error(format!("error opening service {}: {e:?}", self.config.name())))
    }

    fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            name: self.config.name().into(),
            display_name: self.config.display_name().into(),
            service_type: ServiceType::OWN_PROCESS,
            start_type: if self.config.autostart {
                ServiceStartType::AutoStart
            } else {
                ServiceStartType::OnDemand
            },
            error_control: ServiceErrorControl::Normal,
            executable_path: self.config.program.clone(),
            launch_arguments: self.config.arguments.iter().map(Into::into).collect(),
            dependencies: vec![],
            account_name: None, // run as System
            account_password: None,
        }
    }
}

impl Manager for WindowsServiceManager {
    fn create(&self) -> io::Result<()> {
        let manager =
            self.get_manager(ServiceManagerAccess::CONNECT | ServiceManagerAccess::CREATE_SERVICE)?;
        let service = manager
            .create_service(&self.service_info(), ServiceAccess::CHANGE_CONFIG)
            .map_err(|e| {
                io_error(format!(
                    "error creating service {}: {e:?}",
                    self.config.name()
                ))
            })?;
        service
            .set_description(&self.config.description)
            .map_err(|e| io_error(format!("error setting service description: {e:?}")))
    }

    fn delete(&self) -> io::Result<()> {
        self.open_service(ServiceAccess::DELETE)?
            .delete()
            .map_err(|e| {
                io_error(format!(
                    "error deleting service {}: {e:?}",
                    self.config.name()
                ))
            })
    }

    fn start(&self) -> io::Result<()> {
        self.open_service(ServiceAccess::START)?
            .start::<&OsStr>(&[])
            .map_err(|e| {
                io_error(format!(
                    "error starting service {}: {e:?}",
                    self.config.name()
                ))
            })
    }

    fn stop(&self) -> io::Result<()> {
        self.open_service(ServiceAccess::STOP)?
            .stop()
            .map(|_| ())
            .map_err(|e| {
                io_error(format!(
                    "error stopping service {}: {e:?}",
                    self.config.name()
                ))
            })
    }
}

fn io_error(message: String) -> io::Error {
    io::Error::other(message)
}
